use super::{
    api_url_const, concrete_path, expect_at_least, expect_below, expect_defined, expect_eq,
    expect_ok, line, Module, Suite,
};
use crate::scan::Endpoint;
use crate::types::{Framework, HttpMethod};

/// Endpoint used when no endpoint was selected.
pub const DEFAULT_ENDPOINT: &str = "/items";

const PAYLOAD: &str = "{ name: 'Test item', description: 'Created by an automated test' }";

/// Playwright and mocha call the API through axios; Cypress has `cy.request`.
fn suite(framework: Framework, name: &str) -> Suite<'_> {
    let suite = Suite::new(framework, name).prelude(api_url_const(framework));
    match framework {
        Framework::Cypress => suite,
        Framework::Playwright | Framework::Selenium => suite.uses(Module::Axios),
    }
}

/// Success and error-path tests for one endpoint.
pub fn endpoint(framework: Framework, name: &str, endpoint: &Endpoint) -> String {
    let method = endpoint.method;
    let url = format!("`${{API_URL}}{}`", concrete_path(&endpoint.path));
    let label = format!("{} {}", method, endpoint.path);

    let (success, failure) = match framework {
        Framework::Cypress => (cy_success(method, &url), cy_failure(method, &url, true)),
        Framework::Playwright | Framework::Selenium => (
            axios_success(framework, method, &url),
            axios_failure(framework, &error_request(method, &url)),
        ),
    };

    suite(framework, name)
        .case(&format!("{label} succeeds"), success)
        .case(&format!("{label} rejects an unauthorized request"), failure)
        .render()
}

fn axios_success(framework: Framework, method: HttpMethod, url: &str) -> String {
    let call = method.client_fn();
    let mut body = if method.has_payload() {
        format!(
            "    const payload = {PAYLOAD};\n    const response = await axios.{call}({url}, payload);\n"
        )
    } else {
        format!("    const response = await axios.{call}({url});\n")
    };
    body.push_str(&line(&expect_eq(
        framework,
        "response.status",
        &method.success_status().to_string(),
    )));
    body.push_str(&line(&expect_defined(framework, "response.data")));
    body
}

fn axios_failure(framework: Framework, request: &str) -> String {
    let mut body = format!("    const error = await {request}.catch((e) => e);\n");
    body.push_str(&line(&expect_defined(framework, "error.response")));
    body.push_str(&line(&expect_at_least(framework, "error.response.status", "400")));
    body.push_str(&line(&expect_below(framework, "error.response.status", "500")));
    body
}

fn error_request(method: HttpMethod, url: &str) -> String {
    let call = method.client_fn();
    let auth = "{ headers: { Authorization: 'Bearer invalid-token' } }";
    if method.has_payload() {
        format!("axios.{call}({url}, {{}}, {auth})")
    } else {
        format!("axios.{call}({url}, {auth})")
    }
}

fn cy_success(method: HttpMethod, url: &str) -> String {
    let status = method.success_status();
    let (decl, body) = if method.has_payload() {
        (format!("    const payload = {PAYLOAD};\n"), ", body: payload")
    } else {
        (String::new(), "")
    };
    format!(
        "{decl}\
         \x20   cy.request({{ method: '{method}', url: {url}{body} }}).then((response) => {{\n\
         \x20     expect(response.status).to.equal({status});\n\
         \x20     expect(response.body).to.exist;\n\
         \x20   }});\n"
    )
}

/// `failOnStatusCode: false` lets the 4xx reach the assertions.
fn cy_failure(method: HttpMethod, url: &str, unauthorized: bool) -> String {
    let body = if method.has_payload() {
        "      body: {},\n"
    } else {
        ""
    };
    let headers = if unauthorized {
        "      headers: { Authorization: 'Bearer invalid-token' },\n"
    } else {
        ""
    };
    format!(
        "    cy.request({{\n\
         \x20     method: '{method}',\n\
         \x20     url: {url},\n\
         {body}\
         {headers}\
         \x20     failOnStatusCode: false,\n\
         \x20   }}).then((response) => {{\n\
         \x20     expect(response.status).to.be.at.least(400);\n\
         \x20     expect(response.status).to.be.below(500);\n\
         \x20   }});\n"
    )
}

/// Two tests against [`DEFAULT_ENDPOINT`].
pub fn generic(framework: Framework, name: &str) -> String {
    let url = format!("`${{API_URL}}{DEFAULT_ENDPOINT}`");
    let (list, invalid) = match framework {
        Framework::Cypress => (
            format!(
                "    cy.request({url}).then((response) => {{\n\
                 \x20     expect(response.status).to.equal(200);\n\
                 \x20     expect(response.body).to.be.an('array');\n\
                 \x20   }});\n"
            ),
            cy_failure(HttpMethod::Post, &url, false),
        ),
        Framework::Playwright | Framework::Selenium => {
            let mut list = format!("    const response = await axios.get({url});\n");
            list.push_str(&line(&expect_eq(framework, "response.status", "200")));
            list.push_str(&line(&expect_ok(framework, "Array.isArray(response.data)")));
            (list, axios_failure(framework, &format!("axios.post({url}, {{}})")))
        }
    };
    suite(framework, name)
        .case("lists items", list)
        .case("rejects an invalid item", invalid)
        .render()
}

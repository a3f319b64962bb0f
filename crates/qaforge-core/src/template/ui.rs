use super::{base_url_const, concrete_path, js_str, kebab, Suite};
use crate::select::UiKind;
use crate::types::Framework;

const INPUTS: &str =
    "input:not([type=\"hidden\"]):not([type=\"submit\"]):not([type=\"checkbox\"])";
const ERRORS: &str = "[role=\"alert\"].error, .error-message";
const INVALID: &str = "form :invalid, [role=\"alert\"], .error-message";

fn suite(framework: Framework, name: &str) -> Suite<'_> {
    Suite::new(framework, name)
        .prelude(base_url_const(framework))
        .browser()
}

/// Dispatch on the already-resolved target kind.
pub fn render(framework: Framework, name: &str, kind: UiKind<'_>) -> String {
    match kind {
        UiKind::Route(path) => route(framework, name, path),
        UiKind::Component(component) => component_test(framework, name, component),
        UiKind::Form(path) => form(framework, name, path),
        UiKind::Url(url) => page(framework, name, url),
        UiKind::Generic => generic(framework, name),
    }
}

/// Route existence plus element visibility.
pub fn route(framework: Framework, name: &str, path: &str) -> String {
    let target = concrete_path(path);
    let url = format!("`${{BASE_URL}}{target}`");
    let target_js = js_str(&target);
    let (exists, renders) = match framework {
        Framework::Playwright => (
            format!(
                "    const response = await page.goto({url});\n\
                 \x20   expect(response && response.status()).toBeLessThan(400);\n\
                 \x20   expect(page.url()).toContain('{target_js}');\n"
            ),
            format!(
                "    await page.goto({url});\n\
                 \x20   await expect(page.locator('body')).toBeVisible();\n\
                 \x20   await expect(page.locator('main, #root, #__next').first()).toBeVisible();\n"
            ),
        ),
        // cy.visit fails the test on a 4xx/5xx by itself.
        Framework::Cypress => (
            format!(
                "    cy.visit({url});\n\
                 \x20   cy.url().should('include', '{target_js}');\n"
            ),
            format!(
                "    cy.visit({url});\n\
                 \x20   cy.get('body').should('be.visible');\n\
                 \x20   cy.get('main, #root, #__next').first().should('be.visible');\n"
            ),
        ),
        Framework::Selenium => (
            format!(
                "    await driver.get({url});\n\
                 \x20   expect(await driver.getCurrentUrl()).to.include('{target_js}');\n"
            ),
            format!(
                "    await driver.get({url});\n\
                 \x20   const body = await driver.findElement(By.css('body'));\n\
                 \x20   expect(await body.isDisplayed()).to.equal(true);\n\
                 \x20   const roots = await driver.findElements(By.css('main, #root, #__next'));\n\
                 \x20   expect(roots.length).to.be.above(0);\n"
            ),
        ),
    };
    suite(framework, name)
        .case(&format!("route {path} exists"), exists)
        .case(&format!("route {path} renders its content"), renders)
        .render()
}

/// Component visibility plus a basic interaction.
pub fn component_test(framework: Framework, name: &str, component: &str) -> String {
    let selector = format!("[data-testid=\"{}\"]", kebab(component));
    let (open, visible, interact) = match framework {
        Framework::Playwright => (
            "    await page.goto(BASE_URL);\n".to_string(),
            format!(
                "    const component = page.locator('{selector}');\n\
                 \x20   await expect(component).toBeVisible();\n"
            ),
            format!(
                "    const component = page.locator('{selector}');\n\
                 \x20   const control = component.locator('button, a, input').first();\n\
                 \x20   if (await control.count()) {{\n\
                 \x20     await control.click();\n\
                 \x20   }}\n\
                 \x20   await expect(component).toBeVisible();\n"
            ),
        ),
        Framework::Cypress => (
            "    cy.visit(BASE_URL);\n".to_string(),
            format!("    cy.get('{selector}').should('be.visible');\n"),
            format!(
                "    cy.get('{selector}').then(($component) => {{\n\
                 \x20     const control = $component.find('button, a, input').first();\n\
                 \x20     if (control.length) {{\n\
                 \x20       cy.wrap(control).click();\n\
                 \x20     }}\n\
                 \x20   }});\n\
                 \x20   cy.get('{selector}').should('be.visible');\n"
            ),
        ),
        Framework::Selenium => (
            "    await driver.get(BASE_URL);\n".to_string(),
            format!(
                "    const component = await driver.wait(until.elementLocated(By.css('{selector}')), 10000);\n\
                 \x20   expect(await component.isDisplayed()).to.equal(true);\n"
            ),
            format!(
                "    const component = await driver.findElement(By.css('{selector}'));\n\
                 \x20   const controls = await component.findElements(By.css('button, a, input'));\n\
                 \x20   if (controls.length) {{\n\
                 \x20     await controls[0].click();\n\
                 \x20   }}\n\
                 \x20   expect(await component.isDisplayed()).to.equal(true);\n"
            ),
        ),
    };
    suite(framework, name)
        .before_each(open)
        .case(&format!("{component} is visible"), visible)
        .case(&format!("{component} responds to interaction"), interact)
        .render()
}

/// Form fill, submit and validation.
pub fn form(framework: Framework, name: &str, path: Option<&str>) -> String {
    let target = path.map(concrete_path).unwrap_or_default();
    let url = format!("`${{BASE_URL}}{target}`");
    let (open, fill, validate) = match framework {
        Framework::Playwright => (
            format!("    await page.goto({url});\n"),
            format!(
                "    const form = page.locator('form').first();\n\
                 \x20   await expect(form).toBeVisible();\n\
                 \x20   const inputs = form.locator('{INPUTS}');\n\
                 \x20   const count = await inputs.count();\n\
                 \x20   for (let i = 0; i < count; i++) {{\n\
                 \x20     const type = await inputs.nth(i).getAttribute('type');\n\
                 \x20     await inputs.nth(i).fill(type === 'email' ? (process.env.USER_EMAIL || 'user@example.com') : 'Test value');\n\
                 \x20   }}\n\
                 \x20   await form.locator('[type=\"submit\"]').first().click();\n\
                 \x20   await expect(page.locator('{ERRORS}')).toHaveCount(0);\n"
            ),
            format!(
                "    const form = page.locator('form').first();\n\
                 \x20   await form.locator('[type=\"submit\"]').first().click();\n\
                 \x20   const invalid = page.locator('{INVALID}');\n\
                 \x20   expect(await invalid.count()).toBeGreaterThan(0);\n"
            ),
        ),
        Framework::Cypress => (
            format!("    cy.visit({url});\n"),
            format!(
                "    cy.get('form').first().should('be.visible').within(() => {{\n\
                 \x20     cy.get('{INPUTS}').each(($input) => {{\n\
                 \x20       const value = $input.attr('type') === 'email' ? (Cypress.env('USER_EMAIL') || 'user@example.com') : 'Test value';\n\
                 \x20       cy.wrap($input).clear().type(value);\n\
                 \x20     }});\n\
                 \x20     cy.get('[type=\"submit\"]').first().click();\n\
                 \x20   }});\n\
                 \x20   cy.get('{ERRORS}').should('not.exist');\n"
            ),
            format!(
                "    cy.get('form').first().find('[type=\"submit\"]').first().click();\n\
                 \x20   cy.get('{INVALID}').should('have.length.greaterThan', 0);\n"
            ),
        ),
        Framework::Selenium => (
            format!("    await driver.get({url});\n"),
            format!(
                "    const form = await driver.findElement(By.css('form'));\n\
                 \x20   const inputs = await form.findElements(By.css('{INPUTS}'));\n\
                 \x20   for (const input of inputs) {{\n\
                 \x20     const type = await input.getAttribute('type');\n\
                 \x20     await input.sendKeys(type === 'email' ? (process.env.USER_EMAIL || 'user@example.com') : 'Test value');\n\
                 \x20   }}\n\
                 \x20   await form.findElement(By.css('[type=\"submit\"]')).click();\n\
                 \x20   const errors = await driver.findElements(By.css('{ERRORS}'));\n\
                 \x20   expect(errors.length).to.equal(0);\n"
            ),
            format!(
                "    const form = await driver.findElement(By.css('form'));\n\
                 \x20   await form.findElement(By.css('[type=\"submit\"]')).click();\n\
                 \x20   const invalid = await driver.findElements(By.css('{INVALID}'));\n\
                 \x20   expect(invalid.length).to.be.above(0);\n"
            ),
        ),
    };
    suite(framework, name)
        .before_each(open)
        .case("fills and submits the form", fill)
        .case("shows validation errors for an empty form", validate)
        .render()
}

/// Page load plus element checks for a raw URL or path.
pub fn page(framework: Framework, name: &str, url: &str) -> String {
    let target = if url.starts_with("http://") || url.starts_with("https://") {
        format!("'{}'", js_str(url))
    } else {
        let path = if url.starts_with('/') {
            url.to_string()
        } else {
            format!("/{url}")
        };
        format!("`${{BASE_URL}}{}`", concrete_path(&path))
    };
    let (loads, elements) = match framework {
        Framework::Playwright => (
            format!(
                "    const response = await page.goto({target});\n\
                 \x20   expect(response && response.status()).toBeLessThan(400);\n\
                 \x20   await expect(page).toHaveTitle(/.+/);\n"
            ),
            format!(
                "    await page.goto({target});\n\
                 \x20   await expect(page.locator('body')).toBeVisible();\n\
                 \x20   expect(await page.locator('a, button, input').count()).toBeGreaterThan(0);\n"
            ),
        ),
        Framework::Cypress => (
            format!(
                "    cy.visit({target});\n\
                 \x20   cy.title().should('not.be.empty');\n"
            ),
            format!(
                "    cy.visit({target});\n\
                 \x20   cy.get('body').should('be.visible');\n\
                 \x20   cy.get('a, button, input').should('have.length.greaterThan', 0);\n"
            ),
        ),
        Framework::Selenium => (
            format!(
                "    await driver.get({target});\n\
                 \x20   expect(await driver.getTitle()).to.not.equal('');\n"
            ),
            format!(
                "    await driver.get({target});\n\
                 \x20   const elements = await driver.findElements(By.css('a, button, input'));\n\
                 \x20   expect(elements.length).to.be.above(0);\n"
            ),
        ),
    };
    suite(framework, name)
        .case("page loads", loads)
        .case("page shows its key elements", elements)
        .render()
}

/// Nothing selected: home page smoke test.
pub fn generic(framework: Framework, name: &str) -> String {
    let (loads, content) = match framework {
        Framework::Playwright => (
            "    await page.goto(BASE_URL);\n\
             \x20   await expect(page).toHaveTitle(/.+/);\n",
            "    await page.goto(BASE_URL);\n\
             \x20   await expect(page.locator('body')).toBeVisible();\n",
        ),
        Framework::Cypress => (
            "    cy.visit(BASE_URL);\n\
             \x20   cy.title().should('not.be.empty');\n",
            "    cy.visit(BASE_URL);\n\
             \x20   cy.get('body').should('be.visible');\n",
        ),
        Framework::Selenium => (
            "    await driver.get(BASE_URL);\n\
             \x20   expect(await driver.getTitle()).to.not.equal('');\n",
            "    await driver.get(BASE_URL);\n\
             \x20   const body = await driver.findElement(By.css('body'));\n\
             \x20   expect(await body.isDisplayed()).to.equal(true);\n",
        ),
    };
    suite(framework, name)
        .case("home page loads", loads)
        .case("home page has content", content)
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::ALL_FRAMEWORKS;

    #[test]
    fn route_template_targets_concrete_path() {
        let out = render(Framework::Playwright, "Users", UiKind::Route("/users/:id"));
        assert!(out.contains("test('route /users/:id exists', async ({ page }) => {"));
        assert!(out.contains("page.goto(`${BASE_URL}/users/1`)"));

        let out = render(Framework::Cypress, "Users", UiKind::Route("/users/:id"));
        assert!(out.contains("it('route /users/:id exists', () => {"));
        assert!(out.contains("cy.visit(`${BASE_URL}/users/1`)"));
        assert!(out.contains("const BASE_URL = Cypress.config('baseUrl')"));

        let out = render(Framework::Selenium, "Users", UiKind::Route("/users/:id"));
        assert!(out.contains("await driver.get(`${BASE_URL}/users/1`);"));
        assert!(out.contains("to.include('/users/1')"));
    }

    #[test]
    fn component_template_uses_test_id() {
        for fw in ALL_FRAMEWORKS {
            let out = render(fw, "Card", UiKind::Component("UserCard"));
            assert!(out.contains("[data-testid=\"user-card\"]"), "{fw}");
            assert!(out.contains("'UserCard responds to interaction'"), "{fw}");
        }
        let out = render(Framework::Playwright, "Card", UiKind::Component("UserCard"));
        assert!(out.contains("test.beforeEach(async ({ page }) => {"));
        let out = render(Framework::Cypress, "Card", UiKind::Component("UserCard"));
        assert!(out.contains("  beforeEach(() => {\n    cy.visit(BASE_URL);\n  });"));
    }

    #[test]
    fn form_with_and_without_path() {
        let with = render(Framework::Playwright, "Signup", UiKind::Form(Some("/signup")));
        assert!(with.contains("page.goto(`${BASE_URL}/signup`)"));
        let without = render(Framework::Playwright, "Signup", UiKind::Form(None));
        assert!(without.contains("page.goto(`${BASE_URL}`)"));
        assert!(without.contains("shows validation errors"));

        let cy = render(Framework::Cypress, "Signup", UiKind::Form(Some("/signup")));
        assert!(cy.contains("cy.visit(`${BASE_URL}/signup`)"));
        assert!(cy.contains("Cypress.env('USER_EMAIL')"));
        let se = render(Framework::Selenium, "Signup", UiKind::Form(None));
        assert!(se.contains("await input.sendKeys("));
    }

    #[test]
    fn page_accepts_absolute_and_relative_urls() {
        let abs = render(Framework::Playwright, "Docs", UiKind::Url("https://docs.test/start"));
        assert!(abs.contains("page.goto('https://docs.test/start')"));
        let rel = render(Framework::Playwright, "Docs", UiKind::Url("docs"));
        assert!(rel.contains("page.goto(`${BASE_URL}/docs`)"));
        let cy = render(Framework::Cypress, "Docs", UiKind::Url("https://docs.test/start"));
        assert!(cy.contains("cy.visit('https://docs.test/start')"));
    }

    #[test]
    fn each_kind_is_structurally_different() {
        for fw in ALL_FRAMEWORKS {
            let outputs = [
                render(fw, "T", UiKind::Route("/a")),
                render(fw, "T", UiKind::Component("A")),
                render(fw, "T", UiKind::Form(None)),
                render(fw, "T", UiKind::Url("/a")),
                render(fw, "T", UiKind::Generic),
            ];
            for (i, a) in outputs.iter().enumerate() {
                for b in &outputs[i + 1..] {
                    assert_ne!(a, b, "{fw}");
                }
            }
        }
    }
}

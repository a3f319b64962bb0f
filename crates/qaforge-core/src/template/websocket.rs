use super::{expect_eq, expect_ok, js_str, line, Module, Suite};
use crate::types::Framework;

pub const DEFAULT_URL: &str = "ws://localhost:8080";

/// Milliseconds the send/receive test waits for a reply.
pub const RESPONSE_TIMEOUT_MS: u32 = 5000;

/// Connect, send/receive and disconnect tests against `url`.
///
/// Playwright and mocha run in node and use the `ws` package; Cypress specs
/// run in the browser and use its native `WebSocket`.
pub fn render(framework: Framework, name: &str, url: &str) -> String {
    let url = js_str(url);
    match framework {
        Framework::Cypress => cypress(name, &url),
        Framework::Playwright | Framework::Selenium => node(framework, name, &url),
    }
}

fn node(framework: Framework, name: &str, url: &str) -> String {
    let timeout = RESPONSE_TIMEOUT_MS;
    let prelude = format!(
        "const WS_URL = process.env.WS_URL || '{url}';\n\
         \n\
         function connect() {{\n\
         \x20 return new Promise((resolve, reject) => {{\n\
         \x20   const ws = new WebSocket(WS_URL);\n\
         \x20   ws.once('open', () => resolve(ws));\n\
         \x20   ws.once('error', reject);\n\
         \x20 }});\n\
         }}\n"
    );

    let mut connects = String::from("    const ws = await connect();\n");
    connects.push_str(&line(&expect_eq(framework, "ws.readyState", "WebSocket.OPEN")));
    connects.push_str("    ws.close();\n");

    let mut exchange = format!(
        "    const ws = await connect();\n\
         \x20   const reply = new Promise((resolve, reject) => {{\n\
         \x20     const timer = setTimeout(() => reject(new Error('no response within {timeout}ms')), {timeout});\n\
         \x20     ws.once('message', (data) => {{\n\
         \x20       clearTimeout(timer);\n\
         \x20       resolve(data.toString());\n\
         \x20     }});\n\
         \x20   }});\n\
         \x20   ws.send(JSON.stringify({{ type: 'ping', payload: 'hello' }}));\n"
    );
    exchange.push_str(&line(&expect_ok(framework, "await reply")));
    exchange.push_str("    ws.close();\n");

    let mut disconnects = String::from(
        "    const ws = await connect();\n\
         \x20   const closed = new Promise((resolve) => ws.once('close', resolve));\n\
         \x20   ws.close();\n\
         \x20   await closed;\n",
    );
    disconnects.push_str(&line(&expect_eq(framework, "ws.readyState", "WebSocket.CLOSED")));

    Suite::new(framework, name)
        .uses(Module::Ws)
        .prelude(prelude)
        .case("connects", connects)
        .case("sends and receives a message", exchange)
        .case("disconnects cleanly", disconnects)
        .render()
}

fn cypress(name: &str, url: &str) -> String {
    let timeout = RESPONSE_TIMEOUT_MS;
    let prelude = format!(
        "const WS_URL = Cypress.env('wsUrl') || '{url}';\n\
         const WAIT = {{ timeout: {wait} }};\n\
         \n\
         function connect() {{\n\
         \x20 return new Promise((resolve, reject) => {{\n\
         \x20   const ws = new WebSocket(WS_URL);\n\
         \x20   ws.addEventListener('open', () => resolve(ws), {{ once: true }});\n\
         \x20   ws.addEventListener('error', () => reject(new Error(`could not connect to ${{WS_URL}}`)), {{ once: true }});\n\
         \x20 }});\n\
         }}\n",
        wait = timeout + 1000,
    );

    let connects = "    cy.wrap(connect(), WAIT).then((ws) => {\n\
                    \x20     expect(ws.readyState).to.equal(WebSocket.OPEN);\n\
                    \x20     ws.close();\n\
                    \x20   });\n";

    let exchange = format!(
        "    let socket;\n\
         \x20   cy.wrap(connect(), WAIT)\n\
         \x20     .then((ws) => {{\n\
         \x20       socket = ws;\n\
         \x20       const reply = new Promise((resolve, reject) => {{\n\
         \x20         const timer = setTimeout(() => reject(new Error('no response within {timeout}ms')), {timeout});\n\
         \x20         ws.addEventListener('message', (event) => {{\n\
         \x20           clearTimeout(timer);\n\
         \x20           resolve(String(event.data));\n\
         \x20         }}, {{ once: true }});\n\
         \x20       }});\n\
         \x20       ws.send(JSON.stringify({{ type: 'ping', payload: 'hello' }}));\n\
         \x20       return cy.wrap(reply, WAIT);\n\
         \x20     }})\n\
         \x20     .then((message) => {{\n\
         \x20       expect(message).to.be.ok;\n\
         \x20       socket.close();\n\
         \x20     }});\n"
    );

    let disconnects = "    cy.wrap(connect(), WAIT).then((ws) => {\n\
                       \x20     const closed = new Promise((resolve) => ws.addEventListener('close', resolve, { once: true }));\n\
                       \x20     ws.close();\n\
                       \x20     return cy.wrap(closed, WAIT).then(() => {\n\
                       \x20       expect(ws.readyState).to.equal(WebSocket.CLOSED);\n\
                       \x20     });\n\
                       \x20   });\n";

    Suite::new(Framework::Cypress, name)
        .prelude(prelude)
        .case("connects", connects)
        .case("sends and receives a message", exchange)
        .case("disconnects cleanly", disconnects)
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::ALL_FRAMEWORKS;

    #[test]
    fn parameterised_by_url() {
        let out = render(Framework::Playwright, "Chat", "wss://chat.test/socket");
        assert!(out.contains("const WS_URL = process.env.WS_URL || 'wss://chat.test/socket';"));
        assert!(out.contains("import WebSocket from 'ws';"));
        assert!(out.contains("test('connects'"));
        assert!(out.contains("test('sends and receives a message'"));
        assert!(out.contains("test('disconnects cleanly'"));

        let out = render(Framework::Cypress, "Chat", "wss://chat.test/socket");
        assert!(out.contains("const WS_URL = Cypress.env('wsUrl') || 'wss://chat.test/socket';"));
        assert!(!out.contains("'ws'"));
        assert!(out.contains("it('disconnects cleanly', () => {"));

        let out = render(Framework::Selenium, "Chat", "wss://chat.test/socket");
        assert!(out.contains("const WebSocket = require('ws');"));
        assert!(out.contains("expect(ws.readyState).to.equal(WebSocket.OPEN);"));
    }

    #[test]
    fn send_receive_waits_five_seconds() {
        for fw in ALL_FRAMEWORKS {
            let out = render(fw, "Chat", DEFAULT_URL);
            assert!(out.contains("no response within 5000ms')), 5000);"), "{fw}");
            assert!(out.contains("'ws://localhost:8080'"), "{fw}");
        }
    }
}

//! Templates that do not depend on any selection.

use super::{base_url_const, kebab, Module, Suite};
use crate::types::Framework;

/// Page-load budget for the performance template.
pub const LOAD_BUDGET_MS: u32 = 3000;

/// Placeholder score the performance template asserts against.
pub const SCORE_THRESHOLD: u32 = 80;

const NAV_DURATION: &str =
    "const [nav] = performance.getEntriesByType('navigation'); return nav ? nav.duration : 0;";

fn suite(framework: Framework, name: &str) -> Suite<'_> {
    Suite::new(framework, name)
        .prelude(base_url_const(framework))
        .browser()
}

pub fn performance(framework: Framework, name: &str) -> String {
    let (budget, score) = match framework {
        Framework::Playwright => (
            "    const start = Date.now();\n\
             \x20   await page.goto(BASE_URL, { waitUntil: 'load' });\n\
             \x20   const duration = Date.now() - start;\n\
             \x20   expect(duration).toBeLessThan(LOAD_BUDGET_MS);\n"
                .to_string(),
            format!(
                "    await page.goto(BASE_URL, {{ waitUntil: 'load' }});\n\
                 \x20   const loadTime = await page.evaluate(() => {{ {NAV_DURATION} }});\n\
                 \x20   // Replace with a real audit score (e.g. Lighthouse) once one is wired up.\n\
                 \x20   const score = Math.max(0, 100 - Math.round(loadTime / 100));\n\
                 \x20   expect(score).toBeGreaterThanOrEqual(SCORE_THRESHOLD);\n"
            ),
        ),
        Framework::Cypress => (
            "    cy.visit(BASE_URL);\n\
             \x20   cy.window().then((win) => {\n\
             \x20     const [nav] = win.performance.getEntriesByType('navigation');\n\
             \x20     expect(nav ? nav.duration : 0).to.be.below(LOAD_BUDGET_MS);\n\
             \x20   });\n"
                .to_string(),
            "    cy.visit(BASE_URL);\n\
             \x20   cy.window().then((win) => {\n\
             \x20     const [nav] = win.performance.getEntriesByType('navigation');\n\
             \x20     const loadTime = nav ? nav.duration : 0;\n\
             \x20     // Replace with a real audit score (e.g. Lighthouse) once one is wired up.\n\
             \x20     const score = Math.max(0, 100 - Math.round(loadTime / 100));\n\
             \x20     expect(score).to.be.at.least(SCORE_THRESHOLD);\n\
             \x20   });\n"
                .to_string(),
        ),
        Framework::Selenium => (
            "    const start = Date.now();\n\
             \x20   await driver.get(BASE_URL);\n\
             \x20   expect(Date.now() - start).to.be.below(LOAD_BUDGET_MS);\n"
                .to_string(),
            format!(
                "    await driver.get(BASE_URL);\n\
                 \x20   const loadTime = await driver.executeScript(\"{NAV_DURATION}\");\n\
                 \x20   // Replace with a real audit score (e.g. Lighthouse) once one is wired up.\n\
                 \x20   const score = Math.max(0, 100 - Math.round(loadTime / 100));\n\
                 \x20   expect(score).to.be.at.least(SCORE_THRESHOLD);\n"
            ),
        ),
    };
    suite(framework, name)
        .prelude(format!(
            "const LOAD_BUDGET_MS = {LOAD_BUDGET_MS};\nconst SCORE_THRESHOLD = {SCORE_THRESHOLD};\n"
        ))
        .case("page loads within budget", budget)
        .case("meets the performance score threshold", score)
        .render()
}

/// Desktop (1920x1080) and mobile (375x667) captures of the home page.
///
/// Playwright compares against stored snapshots; Cypress and WebDriver only
/// capture, leaving comparison to whatever reviews `reports/screenshots`.
pub fn visual(framework: Framework, name: &str) -> String {
    let shot = kebab(name);
    let capture = |label: &str, width: u32, height: u32| match framework {
        Framework::Playwright => format!(
            "    await page.setViewportSize({{ width: {width}, height: {height} }});\n\
             \x20   await page.goto(BASE_URL);\n\
             \x20   await expect(page).toHaveScreenshot('{shot}-{label}.png', {{ fullPage: true }});\n"
        ),
        Framework::Cypress => format!(
            "    cy.viewport({width}, {height});\n\
             \x20   cy.visit(BASE_URL);\n\
             \x20   cy.screenshot('{shot}-{label}', {{ capture: 'fullPage' }});\n"
        ),
        Framework::Selenium => format!(
            "    await driver.manage().window().setRect({{ width: {width}, height: {height} }});\n\
             \x20   await driver.get(BASE_URL);\n\
             \x20   const image = await driver.takeScreenshot();\n\
             \x20   fs.mkdirSync(SCREENSHOT_DIR, {{ recursive: true }});\n\
             \x20   fs.writeFileSync(`${{SCREENSHOT_DIR}}/{shot}-{label}.png`, image, 'base64');\n"
        ),
    };
    let mut builder = suite(framework, name);
    if framework == Framework::Selenium {
        builder = builder
            .uses(Module::Fs)
            .prelude("const SCREENSHOT_DIR = 'reports/screenshots';\n");
    }
    builder
        .case("desktop layout matches snapshot", capture("desktop", 1920, 1080))
        .case("mobile layout matches snapshot", capture("mobile", 375, 667))
        .render()
}

pub fn generic(framework: Framework, name: &str) -> String {
    let body = match framework {
        Framework::Playwright => {
            "    await page.goto(BASE_URL);\n\
             \x20   await expect(page.locator('body')).toBeVisible();\n"
        }
        Framework::Cypress => {
            "    cy.visit(BASE_URL);\n\
             \x20   cy.get('body').should('be.visible');\n"
        }
        Framework::Selenium => {
            "    await driver.get(BASE_URL);\n\
             \x20   const body = await driver.findElement(By.css('body'));\n\
             \x20   expect(await body.isDisplayed()).to.equal(true);\n"
        }
    };
    suite(framework, name)
        .case(&format!("{name} works"), body)
        .render()
}

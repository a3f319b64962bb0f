//! Terminal prompts.
//!
//! With `--yes` every prompt answers with its default without touching the
//! terminal, which is what the integration tests and CI rely on.

use dialoguer::{theme::ColorfulTheme, Confirm, FuzzySelect, Input, MultiSelect, Password, Select};
use qaforge_core::select::Chooser;
use qaforge_core::ForgeError;

pub struct Prompter {
    theme: ColorfulTheme,
    assume_defaults: bool,
}

fn prompt_err(e: dialoguer::Error) -> ForgeError {
    ForgeError::Prompt(e.to_string())
}

impl Prompter {
    pub fn new(assume_defaults: bool) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            assume_defaults,
        }
    }

    pub fn is_interactive(&self) -> bool {
        !self.assume_defaults
    }

    /// Use `preset` when given (flag or env var), otherwise ask.
    pub fn text(&self, prompt: &str, preset: Option<&str>, default: &str) -> qaforge_core::Result<String> {
        if let Some(value) = preset {
            return Ok(value.to_string());
        }
        if self.assume_defaults {
            return Ok(default.to_string());
        }
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default.to_string())
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_err)
    }

    /// Non-empty text. Re-asks until something other than whitespace is typed.
    pub fn required(&self, prompt: &str, default: Option<&str>) -> qaforge_core::Result<String> {
        if self.assume_defaults {
            return default
                .map(str::to_string)
                .ok_or_else(|| ForgeError::Prompt(format!("'{prompt}' needs a value")));
        }
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(prompt);
        if let Some(d) = default {
            input = input.default(d.to_string());
        }
        input
            .validate_with(|s: &String| {
                if s.trim().is_empty() {
                    Err("This field is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .map_err(prompt_err)
    }

    /// Blank answer means "not set".
    pub fn optional(&self, prompt: &str, preset: Option<&str>) -> qaforge_core::Result<Option<String>> {
        let value = self.text(prompt, preset, "")?;
        Ok(Some(value).filter(|v| !v.trim().is_empty()))
    }

    pub fn secret(&self, prompt: &str, preset: Option<&str>) -> qaforge_core::Result<Option<String>> {
        if let Some(value) = preset {
            return Ok(Some(value.to_string()));
        }
        if self.assume_defaults {
            return Ok(None);
        }
        let value = Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(prompt_err)?;
        Ok(Some(value).filter(|v| !v.is_empty()))
    }

    pub fn confirm(&self, prompt: &str, default: bool) -> qaforge_core::Result<bool> {
        if self.assume_defaults {
            return Ok(default);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(prompt_err)
    }

    pub fn select(&self, prompt: &str, items: &[&str], default: usize) -> qaforge_core::Result<usize> {
        if self.assume_defaults {
            return Ok(default);
        }
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()
            .map_err(prompt_err)
    }

    /// Checklist; nothing is ticked by default.
    pub fn checklist(&self, prompt: &str, items: &[&str]) -> qaforge_core::Result<Vec<usize>> {
        if self.assume_defaults {
            return Ok(Vec::new());
        }
        MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .interact()
            .map_err(prompt_err)
    }
}

impl Chooser for Prompter {
    fn choose(&self, prompt: &str, items: &[String]) -> qaforge_core::Result<usize> {
        if self.assume_defaults || items.len() == 1 {
            return Ok(0);
        }
        // Scans of large apps produce long lists; fuzzy matching keeps them usable.
        FuzzySelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map_err(prompt_err)
    }

    fn input(&self, prompt: &str, default: &str) -> qaforge_core::Result<String> {
        self.text(prompt, None, default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mode_never_blocks() {
        let p = Prompter::new(true);
        assert!(!p.is_interactive());
        assert_eq!(p.text("Base URL", None, "http://x").unwrap(), "http://x");
        assert_eq!(p.text("Base URL", Some("http://y"), "http://x").unwrap(), "http://y");
        assert_eq!(p.optional("Admin email", None).unwrap(), None);
        assert_eq!(p.secret("Admin password", None).unwrap(), None);
        assert_eq!(
            p.secret("Admin password", Some("hunter2")).unwrap().as_deref(),
            Some("hunter2")
        );
        assert!(p.confirm("Continue?", true).unwrap());
        assert_eq!(p.select("Pick", &["a", "b"], 1).unwrap(), 1);
        assert!(p.checklist("Features", &["a"]).unwrap().is_empty());
        assert_eq!(p.choose("Pick", &["x".into(), "y".into()]).unwrap(), 0);
    }

    #[test]
    fn required_without_default_fails_in_defaults_mode() {
        let p = Prompter::new(true);
        assert!(matches!(p.required("Name", None), Err(ForgeError::Prompt(_))));
        assert_eq!(p.required("Name", Some("demo")).unwrap(), "demo");
    }
}

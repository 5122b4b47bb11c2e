pub mod draw;
pub mod plan;
pub mod shuffle;
pub mod spin;
pub mod tui;

use std::path::Path;

use dl_core::{Catalog, DrawConfig, DrawEventKind, DrawSession, Lang, Translator, truncate_label};

/// Settings shared by every command.
pub struct Context {
    pub config: DrawConfig,
    pub lang: Lang,
    catalog: Catalog,
}

impl Context {
    /// Read the config file (if any) and apply the seed override.
    pub fn load(path: Option<&Path>, seed: Option<u64>, lang: Lang) -> Result<Self, String> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
                DrawConfig::from_json(&text).map_err(|e| format!("{}: {e}", path.display()))?
            }
            None => DrawConfig::default(),
        };
        if let Some(seed) = seed {
            config = config.with_seed(seed);
        }
        Ok(Self {
            config,
            lang,
            catalog: Catalog::new(),
        })
    }

    /// Translated UI text.
    pub fn t(&self, key: &str) -> String {
        self.catalog.translate(self.lang, key)
    }

    /// A fresh session holding `labels` in the order given.
    ///
    /// Labels are trimmed and cut to the configured length first; duplicates
    /// collapse. Fails when fewer than the required number remain.
    pub fn session(&self, labels: &[String]) -> Result<DrawSession, String> {
        let mut session = DrawSession::new(self.config.clone()).map_err(|e| e.to_string())?;
        for label in labels {
            session.add_option(&truncate_label(label, self.config.max_label_chars));
        }
        if session.options().len() < self.config.min_options {
            return Err(self.t("pleaseInput2"));
        }
        Ok(session)
    }
}

/// Index and label of the most recent resolution in the session log.
fn resolved(session: &DrawSession) -> Option<(usize, String)> {
    session.events().iter().rev().find_map(|e| match &e.kind {
        DrawEventKind::DrawResolved { index, label } => Some((*index, label.clone())),
        _ => None,
    })
}

/// Format a duration in time units as seconds.
fn seconds(units: u64) -> String {
    format!("{:.1}s", units as f64 / 1000.0)
}

//! # Preview Configuration
//!
//! Business identity, strictness and page geometry for the preview app.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     GSTDESK_BUSINESS_NAME, GSTDESK_GSTIN, GSTDESK_STRICT               │
//! │     GSTDESK_PAGE_CAPACITY, GSTDESK_SUMMARY_RESERVE                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config PATH, or                                                  │
//! │     ~/.config/gstdesk/preview.toml (Linux)                             │
//! │     ~/Library/Application Support/in.gstdesk.gstdesk/preview.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Built-in layout profile per document kind                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # preview.toml
//! [business]
//! name = "Sri Ganesh Electricals"
//! gstin = "33ABCDE1234F1Z5"
//!
//! [validation]
//! strict = true
//!
//! [layout]
//! capacity = 18          # every document kind
//! summary_reserve = 6
//!
//! [layout.invoice]
//! row_cost = { chars_per_line = 48 }
//!
//! [layout.eway_bill]
//! capacity = 12
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use gstdesk_core::{DocumentKind, LayoutProfile, RowCostRule};

use crate::error::{PreviewError, PreviewResult};

/// Length of a GSTIN (state code, PAN, entity, `Z`, checksum).
pub const GSTIN_LEN: usize = 15;

// =============================================================================
// Business Identity
// =============================================================================

/// Issuer printed in the page header and signature block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessConfig {
    #[serde(default = "default_business_name")]
    pub name: String,

    /// Empty for unregistered businesses.
    #[serde(default)]
    pub gstin: String,
}

fn default_business_name() -> String {
    "My Business".to_string()
}

impl Default for BusinessConfig {
    fn default() -> Self {
        BusinessConfig {
            name: default_business_name(),
            gstin: String::new(),
        }
    }
}

// =============================================================================
// Validation Settings
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// Reject negative amounts, impossible rates and malformed HSN codes
    /// instead of printing them as-is.
    #[serde(default)]
    pub strict: bool,
}

// =============================================================================
// Layout Settings
// =============================================================================

/// Partial layout; unset fields keep the value underneath.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_reserve: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_cost: Option<RowCostRule>,
}

impl LayoutOverride {
    fn apply(&self, mut base: LayoutProfile) -> LayoutProfile {
        if let Some(capacity) = self.capacity {
            base.capacity = capacity;
        }
        if let Some(reserve) = self.summary_reserve {
            base.summary_reserve = reserve;
        }
        if let Some(rule) = self.row_cost {
            base.row_cost = rule;
        }
        base
    }
}

/// Page geometry overrides: the flat keys apply to every document kind, the
/// per-kind tables win over them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_reserve: Option<u32>,

    #[serde(default)]
    pub invoice: LayoutOverride,

    #[serde(default)]
    pub quotation: LayoutOverride,

    #[serde(default)]
    pub purchase_order: LayoutOverride,

    #[serde(default)]
    pub eway_bill: LayoutOverride,
}

impl LayoutSettings {
    fn for_kind(&self, kind: DocumentKind) -> &LayoutOverride {
        match kind {
            DocumentKind::Invoice => &self.invoice,
            DocumentKind::Quotation => &self.quotation,
            DocumentKind::PurchaseOrder => &self.purchase_order,
            DocumentKind::EwayBill => &self.eway_bill,
        }
    }
}

// =============================================================================
// Main Preview Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewConfig {
    #[serde(default)]
    pub business: BusinessConfig,

    #[serde(default)]
    pub validation: ValidationSettings,

    #[serde(default)]
    pub layout: LayoutSettings,
}

impl PreviewConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (preview.toml)
    /// 3. Environment variables
    ///
    /// An explicitly given path must exist; the default path is optional.
    /// A config file that exists but does not parse, or a result that fails
    /// [`validate`](Self::validate), is an error either way.
    pub fn load(config_path: Option<PathBuf>) -> PreviewResult<Self> {
        let path = match config_path {
            Some(path) => Some(path),
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Some(path),
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    None
                }
                None => None,
            },
        };

        Self::load_from(path.as_deref(), |key| std::env::var(key).ok())
    }

    fn load_from(path: Option<&Path>, lookup: impl Fn(&str) -> Option<String>) -> PreviewResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> PreviewResult<Self> {
        info!(?path, "Loading preview config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> PreviewResult<()> {
        if self.business.name.trim().is_empty() {
            return Err(PreviewError::InvalidConfig(
                "business.name must not be empty".into(),
            ));
        }

        let gstin = &self.business.gstin;
        if !gstin.is_empty()
            && (gstin.len() != GSTIN_LEN || !gstin.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            return Err(PreviewError::InvalidConfig(format!(
                "GSTIN must be {} letters or digits, got: {}",
                GSTIN_LEN, gstin
            )));
        }

        for kind in DocumentKind::ALL {
            let layout = self.layout_for(kind);
            if layout.capacity == 0 {
                return Err(PreviewError::InvalidConfig(format!(
                    "layout capacity for {} must be greater than 0",
                    kind
                )));
            }
            if layout.summary_reserve >= layout.capacity {
                warn!(
                    %kind,
                    capacity = layout.capacity,
                    summary_reserve = layout.summary_reserve,
                    "Summary reserve fills the page; the last row will always print alone"
                );
            }
        }

        Ok(())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("GSTDESK_BUSINESS_NAME") {
            debug!(name = %name, "Overriding business name from environment");
            self.business.name = name;
        }

        if let Some(gstin) = lookup("GSTDESK_GSTIN") {
            self.business.gstin = gstin.trim().to_uppercase();
        }

        if let Some(strict) = lookup("GSTDESK_STRICT") {
            match strict.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.validation.strict = true,
                "0" | "false" | "no" | "off" => self.validation.strict = false,
                _ => warn!(value = %strict, "Unknown GSTDESK_STRICT value in environment"),
            }
        }

        if let Some(capacity) = lookup("GSTDESK_PAGE_CAPACITY") {
            match capacity.trim().parse::<u32>() {
                Ok(c) => {
                    debug!(capacity = c, "Overriding page capacity from environment");
                    self.layout.capacity = Some(c);
                }
                Err(_) => warn!(value = %capacity, "Ignoring non-numeric GSTDESK_PAGE_CAPACITY"),
            }
        }

        if let Some(reserve) = lookup("GSTDESK_SUMMARY_RESERVE") {
            match reserve.trim().parse::<u32>() {
                Ok(r) => self.layout.summary_reserve = Some(r),
                Err(_) => warn!(value = %reserve, "Ignoring non-numeric GSTDESK_SUMMARY_RESERVE"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("in", "gstdesk", "gstdesk")
            .map(|dirs| dirs.config_dir().join("preview.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Effective page geometry: built-in profile, then the flat `[layout]`
    /// keys, then the per-kind table.
    pub fn layout_for(&self, kind: DocumentKind) -> LayoutProfile {
        let shared = LayoutOverride {
            capacity: self.layout.capacity,
            summary_reserve: self.layout.summary_reserve,
            row_cost: None,
        };
        let base = shared.apply(kind.default_layout());
        self.layout.for_kind(kind).apply(base)
    }

    pub fn is_strict(&self) -> bool {
        self.validation.strict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = PreviewConfig::default();
        assert_eq!(config.business.name, "My Business");
        assert!(!config.is_strict());
        assert!(config.validate().is_ok());

        for kind in DocumentKind::ALL {
            assert_eq!(config.layout_for(kind), kind.default_layout());
        }
    }

    #[test]
    fn test_toml_overrides_layer_over_defaults() {
        let config: PreviewConfig = toml::from_str(
            r#"
            [business]
            name = "Sri Ganesh Electricals"

            [layout]
            summary_reserve = 6

            [layout.invoice]
            row_cost = { chars_per_line = 48 }

            [layout.eway_bill]
            capacity = 12
            "#,
        )
        .unwrap();

        let invoice = config.layout_for(DocumentKind::Invoice);
        assert_eq!(invoice.capacity, 15);
        assert_eq!(invoice.summary_reserve, 6);
        assert_eq!(invoice.row_cost, RowCostRule::CharsPerLine(48));

        let eway = config.layout_for(DocumentKind::EwayBill);
        assert_eq!(eway.capacity, 12);
        assert_eq!(eway.row_cost, RowCostRule::FixedSlot);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = PreviewConfig::default();
        config.apply_overrides(lookup(&[
            ("GSTDESK_BUSINESS_NAME", "Kumar & Sons"),
            ("GSTDESK_GSTIN", " 33abcde1234f1z5 "),
            ("GSTDESK_STRICT", "yes"),
            ("GSTDESK_PAGE_CAPACITY", "25"),
            ("GSTDESK_SUMMARY_RESERVE", "not-a-number"),
        ]));

        assert_eq!(config.business.name, "Kumar & Sons");
        assert_eq!(config.business.gstin, "33ABCDE1234F1Z5");
        assert!(config.is_strict());
        assert_eq!(config.layout_for(DocumentKind::Quotation).capacity, 25);
        assert_eq!(config.layout_for(DocumentKind::Quotation).summary_reserve, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_per_kind_table_beats_env_capacity() {
        let mut config: PreviewConfig = toml::from_str("[layout.invoice]\ncapacity = 10\n").unwrap();
        config.apply_overrides(lookup(&[("GSTDESK_PAGE_CAPACITY", "30")]));

        assert_eq!(config.layout_for(DocumentKind::Invoice).capacity, 10);
        assert_eq!(config.layout_for(DocumentKind::PurchaseOrder).capacity, 30);
    }

    #[test]
    fn test_config_validation() {
        let mut config = PreviewConfig::default();

        config.layout.capacity = Some(0);
        assert!(matches!(config.validate(), Err(PreviewError::InvalidConfig(_))));

        config.layout.capacity = None;
        config.business.gstin = "SHORT".to_string();
        assert!(config.validate().is_err());

        config.business.gstin = "33ABCDE1234F1Z5".to_string();
        assert!(config.validate().is_ok());

        config.business.name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        let result = PreviewConfig::load(Some(PathBuf::from("/nonexistent/gstdesk/preview.toml")));
        assert!(matches!(result, Err(PreviewError::Io(_))));
    }

    #[test]
    fn test_invalid_env_override_is_an_error() {
        let result = PreviewConfig::load_from(None, lookup(&[("GSTDESK_PAGE_CAPACITY", "0")]));
        assert!(matches!(result, Err(PreviewError::InvalidConfig(_))));

        let result = PreviewConfig::load_from(None, lookup(&[("GSTDESK_GSTIN", "NOT-A-GSTIN")]));
        assert!(matches!(result, Err(PreviewError::InvalidConfig(_))));

        let config = PreviewConfig::load_from(None, lookup(&[("GSTDESK_PAGE_CAPACITY", "25")])).unwrap();
        assert_eq!(config.layout_for(DocumentKind::Invoice).capacity, 25);
    }

    #[test]
    fn test_invalid_config_file_is_an_error() {
        let dir = std::env::temp_dir().join(format!("gstdesk-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let bad_gstin = dir.join("bad-gstin.toml");
        std::fs::write(&bad_gstin, "[business]\nname = \"Kumar & Sons\"\ngstin = \"SHORT\"\n").unwrap();
        let result = PreviewConfig::load_from(Some(&bad_gstin), lookup(&[]));
        assert!(matches!(result, Err(PreviewError::InvalidConfig(_))));

        let garbled = dir.join("garbled.toml");
        std::fs::write(&garbled, "[layout\ncapacity = ").unwrap();
        let result = PreviewConfig::load_from(Some(&garbled), lookup(&[]));
        assert!(matches!(result, Err(PreviewError::ConfigParse(_))));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_toml_serialization() {
        let mut config = PreviewConfig::default();
        config.layout.invoice.capacity = Some(12);
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[business]"));
        assert!(toml_str.contains("[layout.invoice]"));

        let back: PreviewConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back, config);
    }
}

//! Content rules that go beyond structure: license whitelist, attribution
//! and tag coverage.

use crate::domain::{MetadataRecord, ValidationResult};

use super::settings::ValidationSettings;

/// Apply the content rules to a structurally valid record
pub fn check_content(
    record: &MetadataRecord,
    settings: &ValidationSettings,
    result: &mut ValidationResult,
) {
    let license = &record.license.license_type;

    if !settings.is_accepted_license(license) {
        result.warning(format!(
            "License type '{}' not in standard list. Please verify it's an acceptable open license.",
            license
        ));
    }

    if record.tags.len() < settings.min_tags {
        result.warning(format!(
            "Consider adding more descriptive tags (minimum {} recommended)",
            settings.min_tags
        ));
    }

    if settings.requires_attribution(license) && record.license.attribution().is_none() {
        result.error(format!("License {} requires attribution field", license));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetType, Creator, FormatDescriptor, License};

    fn record(license: &str, attribution: Option<&str>, tags: &[&str]) -> MetadataRecord {
        MetadataRecord {
            id: "logo".to_string(),
            title: "Logo".to_string(),
            description: "Company logo in vector form".to_string(),
            category: "branding".to_string(),
            subcategory: None,
            asset_type: AssetType::Image,
            version: "1.0.0".to_string(),
            license: License {
                license_type: license.to_string(),
                url: "https://example.com/license".to_string(),
                attribution: attribution.map(String::from),
            },
            creator: Creator {
                name: "Studio".to_string(),
                email: None,
                url: None,
            },
            tags: tags.iter().map(|t| t.to_string()).collect(),
            formats: vec![FormatDescriptor {
                format: "png".to_string(),
                filename: "logo.png".to_string(),
                mimetype: "image/png".to_string(),
                size: 1,
                dimensions: None,
                checksum: None,
            }],
            created: None,
            added: None,
            modified: None,
        }
    }

    fn check(record: &MetadataRecord) -> ValidationResult {
        let mut result = ValidationResult::new("asset");
        check_content(record, &ValidationSettings::default(), &mut result);
        result
    }

    #[test]
    fn test_clean_record_has_no_findings() {
        let result = check(&record("CC0", None, &["a", "b", "c"]));
        assert!(!result.has_findings());
    }

    #[test]
    fn test_cc_by_requires_attribution() {
        for attribution in [None, Some("")] {
            let result = check(&record("CC-BY", attribution, &["a", "b", "c"]));
            assert_eq!(result.errors().len(), 1);
            assert_eq!(result.errors()[0].message, "License CC-BY requires attribution field");
        }

        let result = check(&record("CC-BY", Some("Jo Doe"), &["a", "b", "c"]));
        assert!(result.is_valid());
    }

    #[test]
    fn test_mit_never_requires_attribution() {
        for attribution in [None, Some(""), Some("Jo Doe")] {
            let result = check(&record("MIT", attribution, &["a", "b", "c"]));
            assert!(result.is_valid());
        }
    }

    #[test]
    fn test_unknown_license_is_only_a_warning() {
        let result = check(&record("GPL-3.0", None, &["a", "b", "c"]));
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
        assert!(result.warnings()[0].message.contains("'GPL-3.0'"));
    }

    #[test]
    fn test_sparse_tags_warn() {
        let result = check(&record("MIT", None, &["logo"]));
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
        assert!(result.warnings()[0].message.contains("more descriptive tags"));
    }

    #[test]
    fn test_custom_thresholds() {
        let settings = ValidationSettings {
            min_tags: 1,
            attribution_licenses: vec!["MIT".to_string()],
            ..Default::default()
        };

        let mut result = ValidationResult::new("asset");
        check_content(&record("MIT", None, &["logo"]), &settings, &mut result);
        assert_eq!(result.errors().len(), 1);
        assert!(result.warnings().is_empty());
    }
}

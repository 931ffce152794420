//! Legacy-shape migration for audit documents.
//!
//! Older clients stored a pass-criterion result as a bare status string
//! instead of the `{status, observationDetail, timestamp}` record. The
//! upgrade happens here, on the raw JSON document at the load boundary, so
//! the typed model and the engine only ever see the record shape.

use log::debug;
use serde_json::{Map, Value};

/// Upgrades every legacy pass-criterion result in the document in place.
/// Unknown or missing structure is left untouched.
pub fn migrate_audit_document(document: &mut Value) {
    let mut upgraded = 0usize;
    if let Some(samples) = document.get_mut("samples").and_then(Value::as_array_mut) {
        for sample in samples {
            let Some(results) = sample.get_mut("results").and_then(Value::as_object_mut) else {
                continue;
            };
            for requirement_result in results.values_mut() {
                let Some(checks) = requirement_result
                    .get_mut("checks")
                    .and_then(Value::as_object_mut)
                else {
                    continue;
                };
                for check_result in checks.values_mut() {
                    let Some(criteria) = check_result
                        .get_mut("passCriteria")
                        .and_then(Value::as_object_mut)
                    else {
                        continue;
                    };
                    for criterion in criteria.values_mut() {
                        if upgrade_criterion(criterion) {
                            upgraded += 1;
                        }
                    }
                }
            }
        }
    }
    if upgraded > 0 {
        debug!("migrated {upgraded} legacy pass-criterion results");
    }
}

fn upgrade_criterion(criterion: &mut Value) -> bool {
    let Value::String(status) = criterion else {
        return false;
    };
    let mut record = Map::new();
    record.insert("status".to_string(), Value::String(status.clone()));
    *criterion = Value::Object(record);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn bare_status_strings_become_records() {
        let mut document: Value = serde_json::from_str(indoc! {r#"
            {
              "samples": [
                {
                  "id": "s1",
                  "results": {
                    "r1": {
                      "checks": {
                        "c1": {
                          "overallStatus": "passed",
                          "passCriteria": {
                            "pc1": "failed",
                            "pc2": {"status": "passed"}
                          }
                        }
                      }
                    }
                  }
                }
              ]
            }
        "#})
        .unwrap();

        migrate_audit_document(&mut document);

        let criteria = &document["samples"][0]["results"]["r1"]["checks"]["c1"]["passCriteria"];
        assert_eq!(criteria["pc1"], serde_json::json!({"status": "failed"}));
        assert_eq!(criteria["pc2"], serde_json::json!({"status": "passed"}));
    }

    #[test]
    fn documents_without_samples_are_untouched() {
        let mut document = serde_json::json!({"ruleFile": {}});
        let before = document.clone();
        migrate_audit_document(&mut document);
        assert_eq!(document, before);
    }
}

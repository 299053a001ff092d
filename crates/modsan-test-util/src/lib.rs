//! Shared test utilities for the modsan workspace.

use serde_json::Value;

/// Gradle module metadata as written by `generateMetadataFileFor*Publication`.
///
/// Two variants depend on `com.wonder:wonder-dependencies`; a third has no
/// `dependencies` key at all.
pub const SAMPLE_MODULE_JSON: &str = r#"{
  "formatVersion": "1.1",
  "component": {
    "group": "com.wonder",
    "module": "order-api",
    "version": "1.4.0",
    "attributes": {
      "org.gradle.status": "release"
    }
  },
  "createdBy": {
    "gradle": {
      "version": "8.5"
    }
  },
  "variants": [
    {
      "name": "apiElements",
      "attributes": {
        "org.gradle.category": "library",
        "org.gradle.dependency.bundling": "external",
        "org.gradle.jvm.version": 21,
        "org.gradle.libraryelements": "jar",
        "org.gradle.usage": "java-api"
      },
      "dependencies": [
        {
          "group": "com.wonder",
          "module": "wonder-dependencies",
          "version": {
            "requires": "1.0.12"
          },
          "attributes": {
            "org.gradle.category": "platform"
          },
          "endorseStrictVersions": true
        },
        {
          "group": "com.wonder",
          "module": "core-ng",
          "version": {
            "requires": "9.0.5"
          }
        }
      ],
      "files": [
        {
          "name": "order-api-1.4.0.jar",
          "url": "order-api-1.4.0.jar",
          "size": 5120,
          "sha512": "4f2c7e",
          "sha256": "a1b2c3",
          "sha1": "0d9e8f",
          "md5": "77aa11"
        }
      ]
    },
    {
      "name": "runtimeElements",
      "attributes": {
        "org.gradle.category": "library",
        "org.gradle.usage": "java-runtime"
      },
      "dependencies": [
        {
          "group": "org.slf4j",
          "module": "slf4j-api",
          "version": {
            "requires": "2.0.9"
          }
        },
        {
          "group": "com.wonder",
          "module": "wonder-dependencies",
          "version": {
            "requires": "1.0.12"
          },
          "attributes": {
            "org.gradle.category": "platform"
          }
        }
      ],
      "files": [
        {
          "name": "order-api-1.4.0.jar",
          "url": "order-api-1.4.0.jar",
          "size": 5120
        }
      ]
    },
    {
      "name": "sourcesElements",
      "attributes": {
        "org.gradle.category": "documentation",
        "org.gradle.docstype": "sources"
      },
      "files": []
    }
  ]
}
"#;

/// Normalize non-deterministic report fields for golden-file comparison.
///
/// `tool.version` is replaced only on a root object that looks like a report
/// (has `schema`, `tool`, `verdict` and `files`). Timestamp keys are replaced
/// at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_report = obj.contains_key("schema")
            && obj.contains_key("tool")
            && obj.contains_key("verdict")
            && obj.contains_key("files");
        if is_report
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if let Some(slot) = map.get_mut(key) {
                    *slot = Value::String("__TIMESTAMP__".to_string());
                }
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

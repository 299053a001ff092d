use serde::{Deserialize, Serialize};

/// Root `publish.json` as read by the publishing build.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishConfig {
    #[serde(default)]
    pub modules: Vec<PublishModule>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishModule {
    pub name: String,
    #[serde(default, rename = "artifactId", skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

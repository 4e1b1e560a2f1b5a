//! Knowledge-base sites and articles.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::common::{BaseEntity, EntityRef};

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HelpDocSite {
    #[serde(flatten)]
    pub base: BaseEntity,
    pub name: String,
    pub subdomain: Option<String>,
    pub custom_domain: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HelpDocArticle {
    #[serde(flatten)]
    pub base: BaseEntity,
    pub title: String,
    pub contents: String,
    pub slug: Option<String>,
    pub status: Option<String>,
    pub site: Option<EntityRef>,
}

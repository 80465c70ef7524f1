//! Read-only view of the application's bucket router.
//!
//! The router itself is defined by the application; this crate only walks
//! it to build the `/get-token` body.

use crate::{
    types::{BucketType, PathSegment},
    ClientError, Result,
};
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Produces the value of one path segment
pub type PathProducer = Arc<dyn Fn() -> String + Send + Sync>;

/// Access-control descriptor, forwarded to the backend untouched
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessControl(pub serde_json::Value);

/// One entry of a bucket's path schema.
///
/// Only the first `(key, producer)` pair is used; an entry without any pair
/// is rejected when a token is requested.
#[derive(Clone, Default)]
pub struct PathParam {
    entries: Vec<(String, PathProducer)>,
}

impl PathParam {
    pub fn new(
        key: impl Into<String>,
        producer: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        Self::empty().with(key, producer)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        key: impl Into<String>,
        producer: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        self.entries.push((key.into(), Arc::new(producer)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evaluate(&self) -> Option<PathSegment> {
        self.entries
            .first()
            .map(|(key, producer)| PathSegment::new(key.clone(), producer()))
    }
}

impl fmt::Debug for PathParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(key, _)| key))
            .finish()
    }
}

/// Declaration of a single bucket
#[derive(Clone, Debug, Default)]
pub struct BucketDefinition {
    pub bucket_type: BucketType,
    pub path: Vec<PathParam>,
    pub access_control: Option<AccessControl>,
}

impl BucketDefinition {
    pub fn new(bucket_type: BucketType) -> Self {
        Self {
            bucket_type,
            ..Default::default()
        }
    }

    pub fn with_path_param(
        self,
        key: impl Into<String>,
        producer: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        self.with_path(PathParam::new(key, producer))
    }

    pub fn with_path(mut self, param: PathParam) -> Self {
        self.path.push(param);
        self
    }

    pub fn with_access_control(mut self, access_control: serde_json::Value) -> Self {
        self.access_control = Some(AccessControl(access_control));
        self
    }
}

/// Bucket name to definition mapping
#[derive(Clone, Debug, Default)]
pub struct EdgeStoreRouter {
    pub buckets: BTreeMap<String, BucketDefinition>,
}

impl EdgeStoreRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket(mut self, name: impl Into<String>, definition: BucketDefinition) -> Self {
        self.buckets.insert(name.into(), definition);
        self
    }

    /// Evaluate every bucket's path producers into the token request shape
    pub(crate) fn token_buckets(&self) -> Result<BTreeMap<&str, TokenBucket<'_>>> {
        self.buckets
            .iter()
            .map(|(name, bucket)| {
                let path = bucket
                    .path
                    .iter()
                    .enumerate()
                    .map(|(index, param)| {
                        param.evaluate().ok_or_else(|| ClientError::EmptyPathParam {
                            bucket: name.clone(),
                            index,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;

                Ok((
                    name.as_str(),
                    TokenBucket {
                        path,
                        access_control: bucket.access_control.as_ref(),
                    },
                ))
            })
            .collect()
    }
}

/// Per-bucket entry of the `/get-token` body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenBucket<'a> {
    pub path: Vec<PathSegment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_control: Option<&'a AccessControl>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_buckets_evaluate_in_order() {
        let router = EdgeStoreRouter::new()
            .bucket(
                "images",
                BucketDefinition::new(BucketType::Image)
                    .with_path_param("org", || "ctx.orgId".to_string())
                    .with_path_param("user", || "ctx.userId".to_string())
                    .with_access_control(json!({"userId": {"path": "user"}})),
            )
            .bucket("docs", BucketDefinition::new(BucketType::File));

        let buckets = router.token_buckets().unwrap();
        assert_eq!(
            serde_json::to_value(&buckets).unwrap(),
            json!({
                "docs": {"path": []},
                "images": {
                    "path": [
                        {"key": "org", "value": "ctx.orgId"},
                        {"key": "user", "value": "ctx.userId"}
                    ],
                    "accessControl": {"userId": {"path": "user"}}
                }
            })
        );
    }

    #[test]
    fn test_only_first_pair_counts() {
        let param = PathParam::new("a", || "1".to_string()).with("b", || "2".to_string());
        assert_eq!(param.evaluate(), Some(PathSegment::new("a", "1")));
    }

    #[test]
    fn test_empty_path_param_rejected() {
        let router = EdgeStoreRouter::new().bucket(
            "files",
            BucketDefinition::new(BucketType::File)
                .with_path_param("type", || "ctx.type".to_string())
                .with_path(PathParam::empty()),
        );

        match router.token_buckets() {
            Err(ClientError::EmptyPathParam { bucket, index }) => {
                assert_eq!(bucket, "files");
                assert_eq!(index, 1);
            }
            other => panic!("Expected EmptyPathParam, got {other:?}"),
        }
    }
}

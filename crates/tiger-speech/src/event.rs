//! Object-storage notification payload.
//!
//! Only the fields the function reads are modelled; everything else in the
//! notification is ignored.

use serde::Deserialize;

/// An S3 event notification.
#[derive(Clone, Debug, Deserialize)]
pub struct StorageEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<StorageRecord>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StorageRecord {
    pub s3: StorageEntity,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StorageEntity {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ObjectRef {
    pub key: String,
}

impl StorageEvent {
    /// `(bucket, key)` of the first record. Later records are ignored.
    pub fn first_object(&self) -> Option<(&str, &str)> {
        self.records
            .first()
            .map(|r| (r.s3.bucket.name.as_str(), r.s3.object.key.as_str()))
    }
}

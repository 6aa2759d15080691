//! Profile directory — external service mapping addresses and ids to
//! profile records.
//!
//! The directory is consumed through the [`ProfileDirectory`] trait;
//! [`http::HttpDirectory`] is the REST implementation. [`resolver`] holds
//! the lookup algorithm both flows share.

pub mod http;
pub mod model;
pub mod resolver;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::DirectoryError;
use crate::wallet::Address;

pub use http::HttpDirectory;
pub use model::Profile;
pub use resolver::{ProfileResolver, Resolution, info_message};

/// Directory lookups the flows depend on.
///
/// `users_by_address` returns a map keyed by address string. The casing of
/// the response keys is not guaranteed to match the query; callers must
/// probe both the as-given and lower-cased forms.
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// Profiles registered against an address, keyed by address string.
    async fn users_by_address(
        &self,
        address: &Address,
    ) -> Result<HashMap<String, Vec<Profile>>, DirectoryError>;

    /// Profiles by numeric id, resolved from the viewer's perspective.
    async fn users_by_fid(
        &self,
        fid: u64,
        viewer_fid: u64,
    ) -> Result<Vec<Profile>, DirectoryError>;
}

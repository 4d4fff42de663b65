//! Retrieve collection content into a workspace

use std::path::PathBuf;

use tracing::{debug, info};

use super::absolute_workspace;
use crate::collection::AttributeMap;
use crate::common::ValidationUtils;
use crate::error::Result;
use crate::manager::{CollectionManager, RetrieveRequest};
use crate::registry::CredentialResolver;

#[derive(Debug, Clone)]
pub struct PullOptions {
    /// Registry path of the source collection, e.g. `localhost:5000/image:latest`
    pub reference: String,
    /// Output directory, relative paths are resolved against the current directory
    pub workspace: PathBuf,
    /// Only content carrying these attributes is retrieved
    pub attributes: AttributeMap,
}

/// Pull content from a collection.
///
/// Returns the retrieved digests joined by newlines, or `None` when nothing
/// matched. An empty result is not an error.
pub async fn pull<M>(
    manager: &M,
    credentials: &CredentialResolver,
    options: PullOptions,
) -> Result<Option<String>>
where
    M: CollectionManager + ?Sized,
{
    let PullOptions {
        reference,
        workspace,
        attributes,
    } = options;

    ValidationUtils::validate_reference(&reference)?;

    let destination = absolute_workspace(&workspace)?;
    debug!("Using output directory {}", destination);

    let auth = credentials.resolve(&reference).await?;

    let request = RetrieveRequest {
        source: reference.clone(),
        destination,
        filter: Some(attributes.to_struct()),
        auth: auth.into_proto(),
    };

    let response = manager.retrieve_content(request).await?;

    if response.digests.is_empty() {
        info!("No matching collections for {}", reference);
        return Ok(None);
    }

    Ok(Some(response.digests.join("\n")))
}

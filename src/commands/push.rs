//! Publish workspace content as a collection

use std::path::PathBuf;

use tracing::debug;

use super::absolute_workspace;
use crate::collection::{AttributeTable, Collection};
use crate::common::ValidationUtils;
use crate::error::Result;
use crate::manager::{CollectionManager, PublishRequest};
use crate::registry::CredentialResolver;

#[derive(Debug, Clone)]
pub struct PushOptions {
    /// Directory holding the content to publish
    pub workspace: PathBuf,
    /// Registry path of the destination collection
    pub reference: String,
}

/// Push workspace content to a collection and return the published digest
/// exactly as the manager reported it.
pub async fn push<M>(
    manager: &M,
    credentials: &CredentialResolver,
    table: &AttributeTable,
    options: PushOptions,
) -> Result<String>
where
    M: CollectionManager + ?Sized,
{
    let PushOptions {
        workspace,
        reference,
    } = options;

    ValidationUtils::validate_reference(&reference)?;

    let collection = Collection::build(table);

    let source = absolute_workspace(&workspace)?;
    debug!("Using workspace {}", source);

    let auth = credentials.resolve(&reference).await?;

    let request = PublishRequest {
        source,
        destination: reference,
        collection: Some(collection.into()),
        auth: auth.into_proto(),
    };

    let response = manager.publish_content(request).await?;
    Ok(response.digest)
}

//! Runner dispatching parsed arguments to the pull and push commands

use tracing::debug;

use crate::cli::args::{Args, Command};
use crate::collection::AttributeTable;
use crate::commands::{self, PullOptions, PushOptions};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::manager::{CollectionManager, UnixSocketClient};
use crate::registry::CredentialResolver;

pub struct Runner {
    command: Command,
    config: ClientConfig,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        let config = ClientConfig::new(args.socket.as_deref(), args.docker_config);
        Self {
            command: args.command,
            config,
        }
    }

    /// Run the selected command against the configured socket.
    ///
    /// The returned text is what the command prints on stdout.
    pub async fn run(self) -> Result<Option<String>> {
        let manager = UnixSocketClient::new(self.config.socket_path.clone());
        self.run_with(&manager).await
    }

    pub async fn run_with<M>(self, manager: &M) -> Result<Option<String>>
    where
        M: CollectionManager + ?Sized,
    {
        let credentials = CredentialResolver::from_dir(self.config.docker_config_dir.clone());

        match self.command {
            Command::Pull {
                reference,
                workspace,
                attributes,
            } => {
                debug!("Pulling {} into {}", reference, workspace.display());
                let options = PullOptions {
                    reference,
                    workspace,
                    attributes: attributes.unwrap_or_default(),
                };
                commands::pull(manager, &credentials, options).await
            }
            Command::Push {
                workspace,
                reference,
                collection_config,
            } => {
                debug!("Pushing {} to {}", workspace.display(), reference);
                let table = match collection_config {
                    Some(path) => AttributeTable::load_from_path(&path)?,
                    None => self.config.attribute_table.clone(),
                };
                let options = PushOptions {
                    workspace,
                    reference,
                };
                commands::push(manager, &credentials, &table, options)
                    .await
                    .map(Some)
            }
        }
    }
}

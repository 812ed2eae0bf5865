use crate::api;
use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::Result;
use url::Url;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            dsn,
            jwt_secret,
            allow_origin,
        } => {
            // Fail fast on malformed connection strings
            let dsn = Url::parse(&dsn)?;

            let globals = GlobalArgs::new(jwt_secret);

            api::new(port, dsn.to_string(), globals, &allow_origin).await?;
        }
    }

    Ok(())
}

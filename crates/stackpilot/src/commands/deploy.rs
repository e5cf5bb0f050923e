use crate::commands::Context;
use colored::Colorize;
use stackpilot_core::{deploy, DeployRequest, Error};
use std::collections::BTreeMap;

/// Parse `key=value` attribute arguments.
fn parse_attributes(pairs: &[String]) -> Result<BTreeMap<String, String>, Error> {
    let mut attributes = BTreeMap::new();
    for pair in pairs {
        match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                attributes.insert(key.to_string(), value.to_string());
            }
            _ => {
                return Err(Error::Usage(format!(
                    "attribute {:?} is not a key=value pair",
                    pair
                )));
            }
        }
    }
    Ok(attributes)
}

pub async fn handle(
    ctx: &Context,
    displayname: String,
    attribute_args: Vec<String>,
    networks: Option<String>,
    base: bool,
) -> anyhow::Result<()> {
    let attributes = parse_attributes(&attribute_args)?;
    let request = DeployRequest {
        display_name: displayname.clone(),
        attributes,
        network_ids: networks,
        use_base_image: base,
    };

    let machine_id = deploy(&ctx.cloud, &ctx.inventory, &ctx.settings, &request).await?;
    println!(
        "{}",
        format!("{} started, machine id {}", displayname, machine_id).green()
    );
    Ok(())
}

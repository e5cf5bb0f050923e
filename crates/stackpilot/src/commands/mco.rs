use stackpilot_core::Error;
use stackpilot_puppet::Mco;

pub async fn handle(args: Vec<String>) -> anyhow::Result<()> {
    if args.is_empty() {
        return Err(Error::Usage("specify an mco command, e.g. `mco find`".to_string()).into());
    }

    let output = Mco::new().run(&args).await?;
    print!("{}", output);
    Ok(())
}

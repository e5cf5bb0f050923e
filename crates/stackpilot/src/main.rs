mod commands;
mod pretty;
mod shell;

use clap::{Parser, Subcommand, ValueEnum};
use stackpilot_cloudstack::CloudStackClient;
use stackpilot_core::Settings;
use stackpilot_puppet::PuppetInventory;

#[derive(Parser)]
#[command(name = "stackpilot")]
#[command(about = "Deploy and manage machines on a CloudStack cloud", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show running machines
    Status {
        /// Also show machines that are not running
        #[arg(short, long)]
        all: bool,
    },
    /// Deploy a machine with role metadata
    ///
    /// The key=value attributes end up in the machine's bootstrap payload;
    /// at least a role is required, e.g. `deploy lb1 role=lvs`.
    Deploy {
        /// Display name for the new machine
        displayname: String,
        /// Role and further metadata as key=value pairs
        attributes: Vec<String>,
        /// Comma-separated extra network ids
        #[arg(long)]
        networks: Option<String>,
        /// Deploy from the base image, without a puppet agent (needed for
        /// the puppet master, whose certificate is handled manually)
        #[arg(long)]
        base: bool,
    },
    /// Destroy a machine and clean up its dependent resources
    Destroy {
        machine_id: String,
    },
    /// Start a stopped machine
    Start {
        machine_id: String,
    },
    /// Stop a running machine
    Stop {
        machine_id: String,
    },
    /// Reboot a running machine
    Reboot {
        machine_id: String,
    },
    /// List cloud resources
    List {
        resource: ListResource,
    },
    /// Request a public ip address on the virtual router
    Request {
        resource: PoolResource,
    },
    /// Release a public ip address
    Release {
        resource: PoolResource,
        id: String,
    },
    /// Create a single port forward for a machine and ip
    Portfw {
        machine_id: String,
        ip_id: String,
        public_port: u16,
        private_port: u16,
    },
    /// Make a machine reachable over ssh on every public ip
    Ssh {
        machine_id: String,
        public_port: u16,
    },
    /// Trigger a puppet run on one machine or a whole role
    Kick {
        machine_id: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    /// Run an arbitrary mcollective command
    Mco {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Interactive prompt (supports quit/exit)
    Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum ListResource {
    Templates,
    Serviceofferings,
    Diskofferings,
    Ip,
    Networks,
    Portforwardings,
    Firewall,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum PoolResource {
    Ip,
}

pub(crate) async fn dispatch(command: Commands, ctx: &commands::Context) -> anyhow::Result<()> {
    match command {
        Commands::Status { all } => commands::status::handle(ctx, all).await,
        Commands::Deploy {
            displayname,
            attributes,
            networks,
            base,
        } => commands::deploy::handle(ctx, displayname, attributes, networks, base).await,
        Commands::Destroy { machine_id } => commands::destroy::handle(ctx, &machine_id).await,
        Commands::Start { machine_id } => {
            commands::power::handle(ctx, commands::power::PowerAction::Start, &machine_id).await
        }
        Commands::Stop { machine_id } => {
            commands::power::handle(ctx, commands::power::PowerAction::Stop, &machine_id).await
        }
        Commands::Reboot { machine_id } => {
            commands::power::handle(ctx, commands::power::PowerAction::Reboot, &machine_id).await
        }
        Commands::List { resource } => commands::list::handle(ctx, resource).await,
        Commands::Request { resource } => commands::ip::handle_request(ctx, resource).await,
        Commands::Release { resource, id } => {
            commands::ip::handle_release(ctx, resource, &id).await
        }
        Commands::Portfw {
            machine_id,
            ip_id,
            public_port,
            private_port,
        } => commands::portfw::handle(ctx, &machine_id, &ip_id, public_port, private_port).await,
        Commands::Ssh {
            machine_id,
            public_port,
        } => commands::ssh::handle(ctx, &machine_id, public_port).await,
        Commands::Kick { machine_id, role } => {
            commands::kick::handle(ctx, machine_id.as_deref(), role.as_deref()).await
        }
        Commands::Mco { args } => commands::mco::handle(args).await,
        Commands::Shell => {
            println!("already in a shell");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // mco runs locally and needs no cloud settings
    let command = match Cli::parse().command {
        Commands::Mco { args } => return commands::mco::handle(args).await,
        command => command,
    };

    let settings = Settings::load()?;
    let ctx = commands::Context {
        cloud: CloudStackClient::from_settings(&settings),
        inventory: PuppetInventory::new(&settings),
        settings,
    };

    match command {
        Commands::Shell => shell::run(&ctx).await,
        command => dispatch(command, &ctx).await,
    }
}

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pizzeria-cli")]
#[command(about = "A terminal ordering widget: configure items, build a cart, submit the order")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog file path (overrides CATALOG_PATH)
    #[arg(short, long, global = true)]
    pub catalog: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the menu
    Menu,
    /// Price one configuration without touching the cart
    Quote {
        /// Product id
        product: String,
        /// Toggle an option, as group:option (repeatable); starts from the
        /// catalog defaults
        #[arg(short, long = "toggle")]
        toggle: Vec<String>,
        /// Quantity (clamped into the widget bounds)
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Interactively configure items, fill the cart and submit the order
    Order {
        /// Print the payload as JSON instead of submitting it
        #[arg(long)]
        dry_run: bool,
    },
}

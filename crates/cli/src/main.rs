//! Sidecart CLI - inspect and edit the persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart for the configured origin
//! sidecart show
//!
//! # Add two units of a product
//! sidecart add -n "Vitamin C Serum" -p 24.99 -q 2
//!
//! # Change the quantity of the first line (0 removes it)
//! sidecart set 0 3
//!
//! # Print the checkout hand-off link
//! sidecart checkout
//! ```
//!
//! # Commands
//!
//! - `show` - Print lines, item count and total
//! - `add` - Add a product
//! - `remove` - Remove a line by position
//! - `set` - Set a line's quantity by position
//! - `clear` - Empty the cart
//! - `checkout` - Print the order message and link

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sidecart")]
#[command(author, version, about = "Sidecart cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cart
    Show,
    /// Add a product to the cart
    Add {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Unit price; falls back to the configured price when omitted or invalid
        #[arg(short, long)]
        price: Option<String>,

        /// Image reference
        #[arg(short, long, default_value = "")]
        image: String,

        /// Units to add (clamped to 1..=99)
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove the line at a position
    Remove {
        /// Zero-based line position
        index: usize,
    },
    /// Set the quantity of the line at a position
    Set {
        /// Zero-based line position
        index: usize,

        /// New quantity; below one removes the line
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every line
    Clear,
    /// Print the checkout message and link
    Checkout,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::cart::CommandError> {
    let mut session = commands::cart::Session::from_env()?;
    let output = match cli.command {
        Commands::Show => session.show(),
        Commands::Add {
            name,
            price,
            image,
            quantity,
        } => session.add(&name, price.as_deref(), &image, quantity),
        Commands::Remove { index } => session.remove(index),
        Commands::Set { index, quantity } => session.set(index, quantity),
        Commands::Clear => session.clear(),
        Commands::Checkout => session.checkout()?,
    };
    print_output(&output);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_output(output: &str) {
    println!("{output}");
}

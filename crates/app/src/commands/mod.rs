use clap::{Parser, Subcommand};
use comanda_app::{config::AppConfig, context::AppContext};

mod account;
mod cart;
mod catalog;
mod orders;
mod owner;

#[derive(Debug, Parser)]
#[command(name = "comanda", about = "Comanda food ordering CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create an account and sign in
    Register(account::RegisterArgs),
    /// Sign in with email and password
    Login(account::LoginArgs),
    /// Forget the stored session
    Logout,
    /// Show the signed in user
    Whoami,
    /// List restaurants
    Restaurants,
    /// Show a restaurant's menu
    Menu(catalog::MenuArgs),
    /// Inspect or change the cart
    Cart(cart::CartCommand),
    /// Place an order for the cart's contents
    Checkout(orders::CheckoutArgs),
    /// List your orders
    Orders,
    /// Show one order
    Order(orders::OrderArgs),
    /// Restaurant owner tools
    Owner(owner::OwnerCommand),
}

impl Cli {
    pub(crate) async fn run(self, context: &mut AppContext) -> Result<(), String> {
        match self.command {
            Commands::Register(args) => account::register(context, args).await,
            Commands::Login(args) => account::login(context, args).await,
            Commands::Logout => {
                account::logout(context).await;
                Ok(())
            }
            Commands::Whoami => account::whoami(context).await,
            Commands::Restaurants => catalog::restaurants(context).await,
            Commands::Menu(args) => catalog::menu(context, args).await,
            Commands::Cart(command) => cart::run(context, command).await,
            Commands::Checkout(args) => orders::checkout(context, args).await,
            Commands::Orders => orders::list(context).await,
            Commands::Order(args) => orders::show(context, args).await,
            Commands::Owner(command) => owner::run(context, command).await,
        }
    }
}

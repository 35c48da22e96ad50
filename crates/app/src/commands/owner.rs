use clap::{Args, Subcommand, ValueEnum};
use comanda::{money::format_price, orders::OrderStatus};
use comanda_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct OwnerCommand {
    #[command(subcommand)]
    command: OwnerCommands,
}

#[derive(Debug, Subcommand)]
enum OwnerCommands {
    /// List the restaurants you manage
    Restaurants,
    /// List orders placed with your restaurants
    Orders,
    /// Move an order to a new status
    Status(StatusArgs),
    /// Mark a menu item available or sold out
    Toggle(ToggleArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Status {
    Confirmed,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl From<Status> for OrderStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Confirmed => OrderStatus::Confirmed,
            Status::Preparing => OrderStatus::Preparing,
            Status::Ready => OrderStatus::Ready,
            Status::Delivered => OrderStatus::Delivered,
            Status::Cancelled => OrderStatus::Cancelled,
        }
    }
}

#[derive(Debug, Args)]
struct StatusArgs {
    /// Order id
    order: String,

    /// New status
    #[arg(value_enum)]
    status: Status,
}

#[derive(Debug, Args)]
struct ToggleArgs {
    /// Menu item id
    menu_item: String,
}

pub(crate) async fn run(context: &AppContext, command: OwnerCommand) -> Result<(), String> {
    let desk = &context.owners;
    let session = &context.session;

    match command.command {
        OwnerCommands::Restaurants => {
            let restaurants = desk
                .restaurants(session)
                .await
                .map_err(|error| format!("failed to list restaurants: {error}"))?;

            for restaurant in restaurants {
                println!(
                    "{}\t{}\t{}",
                    restaurant.id,
                    restaurant.name,
                    if restaurant.is_active { "open" } else { "closed" },
                );
            }
        }
        OwnerCommands::Orders => {
            let orders = desk
                .orders(session)
                .await
                .map_err(|error| format!("failed to list orders: {error}"))?;

            if orders.is_empty() {
                println!("no orders yet");
            }

            for order in orders {
                println!(
                    "{}\t{}\t{}\t{}",
                    order.id,
                    order.status,
                    order.delivery_address,
                    format_price(order.total_amount, context.currency),
                );
            }
        }
        OwnerCommands::Status(args) => {
            let order = desk
                .update_order_status(session, &args.order.as_str().into(), args.status.into())
                .await
                .map_err(|error| format!("failed to update order: {error}"))?;

            println!("order {} is now {}", order.id, order.status);
        }
        OwnerCommands::Toggle(args) => {
            let item = desk
                .toggle_availability(session, &args.menu_item.as_str().into())
                .await
                .map_err(|error| format!("failed to toggle menu item: {error}"))?;

            println!(
                "{} is now {}",
                item.name,
                if item.is_available { "available" } else { "sold out" },
            );
        }
    }

    Ok(())
}

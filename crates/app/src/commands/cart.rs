use clap::{Args, Subcommand};
use comanda::{
    checkout::CheckoutSummary,
    menu::{MenuItem, MenuItemId},
    money::format_price,
    restaurants::RestaurantId,
};
use comanda_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart and its totals
    Show,
    /// Add one unit of a menu item
    Add(AddArgs),
    /// Remove a line
    Remove(ItemArgs),
    /// Set a line's quantity; zero or less removes it
    Update(UpdateArgs),
    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Restaurant id
    restaurant: RestaurantId,

    /// Menu item id
    item: MenuItemId,
}

#[derive(Debug, Args)]
struct ItemArgs {
    /// Menu item id
    item: MenuItemId,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Menu item id
    item: MenuItemId,

    /// New quantity
    #[arg(allow_negative_numbers = true)]
    quantity: i64,
}

pub(crate) async fn run(context: &mut AppContext, command: CartCommand) -> Result<(), String> {
    match command.command {
        CartSubcommand::Show => {}
        CartSubcommand::Add(args) => add(context, args).await?,
        CartSubcommand::Remove(args) => context.cart.remove_item(&args.item),
        CartSubcommand::Update(args) => context.cart.update_quantity(&args.item, args.quantity),
        CartSubcommand::Clear => context.cart.clear_cart(),
    }

    show(context);

    Ok(())
}

async fn add(context: &mut AppContext, args: AddArgs) -> Result<(), String> {
    let restaurant = context
        .api
        .restaurant(&args.restaurant)
        .await
        .map_err(|error| format!("failed to fetch restaurant: {error}"))?;

    let items = context
        .api
        .menu_items(&args.restaurant)
        .await
        .map_err(|error| format!("failed to fetch menu: {error}"))?;

    let item = find_available(items, &args.item)?;

    context
        .cart
        .add_item(&context.session, item, restaurant)
        .map_err(|error| error.to_string())
}

fn find_available(items: Vec<MenuItem>, id: &MenuItemId) -> Result<MenuItem, String> {
    let item = items
        .into_iter()
        .find(|item| &item.id == id)
        .ok_or_else(|| format!("menu item {id} not found"))?;

    if !item.is_available {
        return Err(format!("{} is not available right now", item.name));
    }

    Ok(item)
}

fn show(context: &AppContext) {
    let state = context.cart.state();

    let Some(restaurant) = state.restaurant() else {
        println!("cart is empty");
        return;
    };

    println!("{} ({} items)", restaurant.name, state.item_count());

    for line in state.lines() {
        println!(
            "{}\t{} x {}\t{}",
            line.menu_item.id,
            line.quantity,
            line.menu_item.name,
            format_price(line.line_total(), context.currency),
        );
    }

    let summary = CheckoutSummary::from_cart(state);

    println!();
    println!("subtotal: {}", format_price(summary.subtotal, context.currency));
    println!("delivery: {}", format_price(summary.delivery_fee, context.currency));
    println!("total: {}", format_price(summary.total, context.currency));

    if let Err(error) = summary.validate() {
        println!("{error}");
    }
}

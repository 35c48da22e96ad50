use clap::Args;
use comanda::{money::format_price, restaurants::RestaurantId};
use comanda_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    /// Restaurant id
    restaurant: RestaurantId,
}

pub(crate) async fn restaurants(context: &AppContext) -> Result<(), String> {
    let restaurants = context
        .api
        .restaurants()
        .await
        .map_err(|error| format!("failed to list restaurants: {error}"))?;

    if restaurants.is_empty() {
        println!("no restaurants found");
        return Ok(());
    }

    for restaurant in restaurants.iter().filter(|r| r.is_active) {
        println!(
            "{}\t{}\t{}\tdelivery {}\tminimum {}",
            restaurant.id,
            restaurant.name,
            restaurant.cuisine_type.as_deref().unwrap_or("-"),
            format_price(restaurant.delivery_fee, context.currency),
            format_price(restaurant.minimum_order, context.currency),
        );
    }

    Ok(())
}

pub(crate) async fn menu(context: &AppContext, args: MenuArgs) -> Result<(), String> {
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

    println!("{}", restaurant.name);

    if let Some(description) = &restaurant.description {
        println!("{description}");
    }

    println!();

    for item in items {
        println!(
            "{}\t{}\t{}{}",
            item.id,
            item.name,
            format_price(item.price, context.currency),
            if item.is_available { "" } else { "\t(unavailable)" },
        );
    }

    Ok(())
}

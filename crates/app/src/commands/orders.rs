use clap::{Args, ValueEnum};
use comanda::{money::format_price, orders::PaymentMethod};
use comanda_app::{checkout::DeliveryDetails, context::AppContext};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Payment {
    /// Hosted checkout with the payment provider
    MercadoPago,
    /// Cash on delivery
    Cash,
}

impl From<Payment> for PaymentMethod {
    fn from(payment: Payment) -> Self {
        match payment {
            Payment::MercadoPago => PaymentMethod::MercadoPago,
            Payment::Cash => PaymentMethod::Cash,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Delivery address; defaults to the address on your account
    #[arg(long)]
    address: Option<String>,

    /// How you will pay
    #[arg(long, value_enum, default_value_t = Payment::MercadoPago)]
    payment: Payment,

    /// Notes for the restaurant
    #[arg(long)]
    notes: Option<String>,
}

pub(crate) async fn checkout(context: &mut AppContext, args: CheckoutArgs) -> Result<(), String> {
    let address = args
        .address
        .or_else(|| context.session.user().and_then(|user| user.address.clone()))
        .unwrap_or_default();

    let details = DeliveryDetails {
        address,
        payment_method: args.payment.into(),
        notes: args.notes,
    };

    let order = context
        .checkout
        .place_order(&context.session, &mut context.cart, details)
        .await
        .map_err(|error| error.to_string())?;

    println!("order_id: {}", order.id);
    println!("status: {}", order.status);
    println!("total: {}", format_price(order.total_amount, context.currency));

    Ok(())
}

#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    /// Order id
    order: String,
}

pub(crate) async fn show(context: &AppContext, args: OrderArgs) -> Result<(), String> {
    let order = context
        .api
        .order(&args.order.into())
        .await
        .map_err(|error| format!("failed to fetch order: {error}"))?;

    println!("order_id: {}", order.id);
    println!("restaurant_id: {}", order.restaurant_id);
    println!("status: {}", order.status);
    println!("payment: {:?}", order.payment_status);
    println!("address: {}", order.delivery_address);
    println!("total: {}", format_price(order.total_amount, context.currency));

    if let Some(notes) = order.notes {
        println!("notes: {notes}");
    }

    Ok(())
}

pub(crate) async fn list(context: &AppContext) -> Result<(), String> {
    let orders = context
        .api
        .orders()
        .await
        .map_err(|error| format!("failed to list orders: {error}"))?;

    if orders.is_empty() {
        println!("no orders yet");
        return Ok(());
    }

    for order in orders {
        println!(
            "{}\t{}\t{}\t{:?}\t{}",
            order.id,
            order
                .created_at
                .map_or_else(|| "-".to_string(), |at| at.to_string()),
            order.status,
            order.payment_status,
            format_price(order.total_amount, context.currency),
        );
    }

    Ok(())
}

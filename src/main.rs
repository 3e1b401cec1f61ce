//! Storefront Cart - command-line shopping cart over the bundled catalog

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use storefront_cart::{
    check_selection, config::CartConfig, CartStore, Catalog, DiscountRate, FileStorage, Size,
    StorefrontError,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "storefront-cart", about = "Storefront shopping cart", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: CartConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the products that can be added
    Catalog,
    /// Add one unit of a product
    Add(LineArgs),
    /// Remove a line
    Remove(LineArgs),
    /// Set the quantity of a line (0 or less removes it)
    Update {
        #[command(flatten)]
        line: LineArgs,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Print the cart with totals
    Show(DiscountArgs),
    /// Print the checkout request for the cart
    Checkout {
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[command(flatten)]
        discount: DiscountArgs,
    },
}

#[derive(Debug, Args)]
struct LineArgs {
    product_id: String,
    #[arg(long)]
    size: Option<Size>,
    #[arg(long)]
    color: Option<String>,
}

#[derive(Debug, Args)]
struct DiscountArgs {
    /// Cart-wide discount rate, e.g. 0.1 for 10%
    #[arg(long, conflicts_with = "first_time")]
    discount: Option<Decimal>,
    /// Apply the first-time customer discount
    #[arg(long)]
    first_time: bool,
}

impl DiscountArgs {
    fn rate(&self) -> Decimal {
        match (self.discount, self.first_time) {
            (Some(rate), _) => rate,
            (None, true) => DiscountRate::FIRST_TIME.rate(),
            (None, false) => Decimal::ZERO,
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.config.log_level.as_str().into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let catalog = Catalog::builtin().context("loading bundled catalog")?;
    let storage = cli.config.storage().context("configuring cart storage")?;
    tracing::debug!(path = %storage.path().display(), "using cart storage");
    let mut store = CartStore::open(storage);

    match cli.command {
        Commands::Catalog => {
            for product in catalog.iter() {
                let sizes = if product.requires_size() { " (sized)" } else { "" };
                let price = money(product.price);
                println!("{:>4}  {:<55} {:>9}{}", product.id, product.name, price, sizes);
            }
        }
        Commands::Add(line) => {
            let product = catalog
                .get(&line.product_id)
                .ok_or_else(|| StorefrontError::ProductNotFound(line.product_id.clone()))?;
            check_selection(product, line.size, line.color.as_deref())?;
            store.add_line(product, line.size, line.color.as_deref());
            println!("Added {} ({} items in cart)", product.name, store.item_count());
        }
        Commands::Remove(line) => {
            store.remove_line(&line.product_id, line.size, line.color.as_deref());
            println!("{} items in cart", store.item_count());
        }
        Commands::Update { line, quantity } => {
            store.update_quantity(&line.product_id, quantity, line.size, line.color.as_deref());
            println!("{} items in cart", store.item_count());
        }
        Commands::Clear => {
            store.clear();
            println!("Cart cleared");
        }
        Commands::Show(discount) => {
            store.set_discount(discount.rate());
            print_cart(&store);
        }
        Commands::Checkout { email, phone, discount } => {
            store.set_discount(discount.rate());
            let request = store.checkout(email, phone).map_err(StorefrontError::from)?;
            println!("{}", serde_json::to_string_pretty(&request)?);
            tracing::info!(
                items = request.items.len(),
                total = %store.total(),
                "checkout request prepared"
            );
        }
    }
    Ok(())
}

fn print_cart(store: &CartStore<FileStorage>) {
    if store.is_empty() {
        println!("Your cart is empty");
        return;
    }
    for line in store.lines() {
        let variant: Vec<String> = line
            .selected_size
            .map(|s| format!("Size: {s}"))
            .into_iter()
            .chain(line.selected_color.as_ref().map(|c| format!("Color: {c}")))
            .collect();
        println!("{:>3} x {} {}", line.quantity.value(), line.product.name, variant.join(", "));
        println!("      {} each, {}", money(line.unit_price()), money(line.line_total()));
    }
    println!("Subtotal  {}", money(store.subtotal()));
    if store.discount() > Decimal::ZERO {
        println!("Discount -{}", money(store.discount_amount()));
    }
    println!("Total     {}", money(store.total()));
    println!("Items     {}", store.item_count());
}

fn money(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

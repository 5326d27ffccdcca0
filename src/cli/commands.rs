use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    api::{HttpOrderTransport, OrderTransport},
    catalog::{CatalogSource, JsonCatalogSource},
    cli::args::*,
    models::{order::ContactInfo, product::Product},
    services::{Cart, ProductConfigurator},
    utils::{
        formatting::{format_cart_table, format_line_detail, format_menu_table, format_price},
        Config,
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static PIZZA: Emoji<'_, '_> = Emoji("🍕 ", "");

pub struct CliApp {
    config: Config,
    catalog: Vec<Arc<Product>>,
    transport: Arc<dyn OrderTransport>,
}

impl CliApp {
    pub async fn new(catalog_override: Option<String>) -> Result<Self> {
        let config = Config::from_env().context("Failed to load configuration")?;

        let catalog_path = catalog_override.unwrap_or_else(|| config.catalog_path.clone());
        let source = JsonCatalogSource::new(&catalog_path);
        let products = source
            .load()
            .await
            .with_context(|| format!("Failed to load catalog from {}", catalog_path))?;

        let transport = Arc::new(HttpOrderTransport::new(config.order_api_url.clone()));

        Ok(Self {
            config,
            catalog: products.into_iter().map(Arc::new).collect(),
            transport,
        })
    }

    pub async fn run(&self, args: Args) -> Result<()> {
        match args.command {
            Commands::Menu => self.handle_menu(),
            Commands::Quote {
                product,
                toggle,
                quantity,
            } => self.handle_quote(product, toggle, quantity),
            Commands::Order { dry_run } => self.handle_order(dry_run).await,
        }
    }

    // Menu

    fn handle_menu(&self) -> Result<()> {
        let products: Vec<Product> = self.catalog.iter().map(|p| (**p).clone()).collect();

        if products.is_empty() {
            println!("{} The menu is empty", WARNING);
        } else {
            println!("{} {}", PIZZA, style("Menu").bold().cyan());
            println!("{}", format_menu_table(&products));
        }

        Ok(())
    }

    // Quote

    fn handle_quote(&self, product_id: String, toggles: Vec<String>, quantity: u32) -> Result<()> {
        let product = self
            .find_product(&product_id)
            .with_context(|| format!("Unknown product '{}'", product_id))?;

        let mut configurator = ProductConfigurator::new(product);

        for toggle in &toggles {
            let (group_id, option_id) = toggle
                .split_once(':')
                .with_context(|| format!("Invalid toggle '{}', expected group:option", toggle))?;

            let selected = !configurator.is_selected(group_id, option_id);
            configurator
                .set_selection(group_id, option_id, selected)
                .with_context(|| format!("Invalid selection '{}'", toggle))?;
        }

        configurator.set_quantity(quantity);
        if configurator.quantity() != quantity {
            println!(
                "{} Quantity clamped to {}",
                WARNING,
                configurator.quantity()
            );
        }

        println!(
            "Unit price: {}",
            style(format_price(configurator.unit_price())).yellow()
        );
        println!(
            "Total ({}x): {}",
            configurator.quantity(),
            style(format_price(configurator.total_price())).cyan()
        );

        Ok(())
    }

    // Interactive order flow

    async fn handle_order(&self, dry_run: bool) -> Result<()> {
        println!("{} {}", PIZZA, style("New Order").bold().cyan());

        let mut cart = Cart::new(self.config.delivery_fee);
        let theme = ColorfulTheme::default();

        loop {
            self.configure_one_item(&theme, &mut cart)?;

            let another = Confirm::with_theme(&theme)
                .with_prompt("Add another item?")
                .default(false)
                .interact()?;
            if !another {
                break;
            }
        }

        if cart.is_empty() {
            println!("{} Cart is empty, nothing to order", INFO);
            return Ok(());
        }

        self.review_cart(&theme, &mut cart)?;

        if cart.is_empty() {
            println!("{} Cart is empty, nothing to order", INFO);
            return Ok(());
        }

        self.submit_order(&theme, &cart, dry_run).await
    }

    fn configure_one_item(&self, theme: &ColorfulTheme, cart: &mut Cart) -> Result<()> {
        let names: Vec<String> = self
            .catalog
            .iter()
            .map(|product| format!("{} ({})", product.name, format_price(product.base_price)))
            .collect();

        let picked = Select::with_theme(theme)
            .with_prompt("Pick an item")
            .items(&names)
            .default(0)
            .interact()?;

        let product = self.catalog[picked].clone();
        let mut configurator = ProductConfigurator::new(product.clone());

        // One multi-select per param group, defaults pre-checked.
        for group in &product.params {
            let option_ids: Vec<&String> = group.options.keys().collect();
            let labels: Vec<String> = group
                .options
                .values()
                .map(|option| format!("{} ({:+})", option.label, option.price))
                .collect();
            let defaults: Vec<bool> = option_ids
                .iter()
                .map(|option_id| configurator.is_selected(&group.id, option_id))
                .collect();

            let chosen = MultiSelect::with_theme(theme)
                .with_prompt(group.label.clone())
                .items(&labels)
                .defaults(&defaults)
                .interact()?;

            for (index, option_id) in option_ids.iter().enumerate() {
                let selected = chosen.contains(&index);
                configurator.set_selection(&group.id, option_id, selected)?;
            }
        }

        let quantity: u32 = Input::with_theme(theme)
            .with_prompt(format!(
                "Quantity [{}-{}]",
                configurator.amount().min(),
                configurator.amount().max()
            ))
            .default(configurator.quantity())
            .interact_text()?;
        configurator.set_quantity(quantity);

        println!(
            "Unit price: {}  Total: {}",
            style(format_price(configurator.unit_price())).yellow(),
            style(format_price(configurator.total_price())).cyan()
        );

        let accept = Confirm::with_theme(theme)
            .with_prompt("Add to cart?")
            .default(true)
            .interact()?;

        if accept {
            let line = configurator.accept_for_cart();
            println!("{} Added to cart!", CHECKMARK);
            println!("{}", format_line_detail(&line));
            cart.add_line(line);
        } else {
            println!("{} Item discarded", INFO);
        }

        Ok(())
    }

    fn review_cart(&self, theme: &ColorfulTheme, cart: &mut Cart) -> Result<()> {
        loop {
            let totals = cart.totals();
            println!("{} {}", INFO, style("Your cart").bold().cyan());
            println!("{}", format_cart_table(cart.lines()));
            println!(
                "Subtotal: {}  Delivery: {}  Total: {}",
                style(format_price(totals.subtotal)).yellow(),
                format_price(cart.delivery_fee()),
                style(format_price(totals.grand_total)).cyan().bold()
            );

            if cart.is_empty() {
                return Ok(());
            }

            let remove = Confirm::with_theme(theme)
                .with_prompt("Remove a line?")
                .default(false)
                .interact()?;
            if !remove {
                return Ok(());
            }

            let labels: Vec<String> = cart
                .lines()
                .iter()
                .map(|line| {
                    format!(
                        "{} x{} ({})",
                        line.product_name,
                        line.quantity,
                        format_price(line.line_total)
                    )
                })
                .collect();

            let picked = Select::with_theme(theme)
                .with_prompt("Which line?")
                .items(&labels)
                .default(0)
                .interact()?;

            let line_id = cart.lines()[picked].id;
            match cart.remove_line(line_id) {
                Ok(removed) => {
                    println!("{} Removed {}", CHECKMARK, removed.product_name);
                }
                Err(e) => {
                    println!("{} Failed to remove line: {}", CROSS, style(&e).red());
                    error!("Failed to remove line: {}", e);
                }
            }
        }
    }

    async fn submit_order(&self, theme: &ColorfulTheme, cart: &Cart, dry_run: bool) -> Result<()> {
        // Contact content is opaque to the core; non-empty is a prompt
        // nicety only.
        let address: String = Input::with_theme(theme)
            .with_prompt("Delivery address")
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() {
                    Err("Address must not be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;

        let phone: String = Input::with_theme(theme)
            .with_prompt("Phone")
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() {
                    Err("Phone must not be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;

        let payload = cart.build_payload(ContactInfo { address, phone });

        if dry_run {
            println!("{}", serde_json::to_string_pretty(&payload)?);
            return Ok(());
        }

        let confirm = Confirm::with_theme(theme)
            .with_prompt(format!(
                "Submit order for {}?",
                format_price(payload.grand_total)
            ))
            .default(true)
            .interact()?;
        if !confirm {
            println!("{} Order not sent", INFO);
            return Ok(());
        }

        match self.transport.submit(&payload).await {
            Ok(()) => {
                println!("{} Order submitted successfully!", CHECKMARK);
                info!("Order submitted: {} items", payload.item_count);
            }
            Err(e) => {
                // The cart stays as it is; submission outcome never rolls
                // back cart state.
                println!("{} Order not sent: {}", CROSS, style(&e).red());
                warn!("Order submission failed: {}", e);
            }
        }

        Ok(())
    }

    // Private helper methods

    fn find_product(&self, product_id: &str) -> Option<Arc<Product>> {
        self.catalog
            .iter()
            .find(|product| product.id == product_id)
            .cloned()
    }
}

use console::style;
use tabled::{
    settings::{Alignment, Style},
    Table, Tabled,
};

use crate::models::{order::OrderLine, product::Product};

#[derive(Tabled)]
struct MenuTableRow {
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Base Price")]
    base_price: String,
    #[tabled(rename = "Options")]
    options: String,
    #[tabled(rename = "Description")]
    description: String,
}

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Options")]
    options: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Unit")]
    unit_price: String,
    #[tabled(rename = "Total")]
    line_total: String,
}

pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

pub fn format_menu_table(products: &[Product]) -> String {
    if products.is_empty() {
        return String::new();
    }

    let rows: Vec<MenuTableRow> = products
        .iter()
        .map(|product| MenuTableRow {
            name: product.name.clone(),
            base_price: format_price(product.base_price),
            options: product
                .params
                .iter()
                .map(|group| group.label.clone())
                .collect::<Vec<_>>()
                .join(", "),
            description: product.description.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());

    table.to_string()
}

pub fn format_cart_table(lines: &[OrderLine]) -> String {
    if lines.is_empty() {
        return String::new();
    }

    let rows: Vec<CartTableRow> = lines
        .iter()
        .enumerate()
        .map(|(index, line)| CartTableRow {
            index: index + 1,
            name: line.product_name.clone(),
            options: format_chosen_options(line),
            quantity: line.quantity,
            unit_price: format_price(line.unit_price),
            line_total: format_price(line.line_total),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());

    table.to_string()
}

pub fn format_line_detail(line: &OrderLine) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}: {}\n",
        style("Item").bold(),
        style(&line.product_name).green()
    ));

    for group in line.chosen.values() {
        let labels: Vec<&str> = group.options.values().map(String::as_str).collect();
        output.push_str(&format!(
            "{}: {}\n",
            style(&group.label).bold(),
            labels.join(", ")
        ));
    }

    output.push_str(&format!(
        "{}: {}\n",
        style("Quantity").bold(),
        line.quantity
    ));
    output.push_str(&format!(
        "{}: {}\n",
        style("Unit price").bold(),
        style(format_price(line.unit_price)).yellow()
    ));
    output.push_str(&format!(
        "{}: {}\n",
        style("Line total").bold(),
        style(format_price(line.line_total)).cyan()
    ));

    output
}

fn format_chosen_options(line: &OrderLine) -> String {
    if line.chosen.is_empty() {
        return "-".to_string();
    }

    line.chosen
        .values()
        .flat_map(|group| group.options.values().cloned())
        .collect::<Vec<_>>()
        .join(", ")
}

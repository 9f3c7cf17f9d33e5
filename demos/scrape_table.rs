//! # Table Scraping Example
//!
//! Demonstrates nested `chroots` combined with `text` to pull a small
//! table of product rows out of a page, filtered by a CSS-class
//! predicate on the row itself.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example scrape_table
//! ```

use htmlcomb::predicate::has_class;
use htmlcomb::scrape;
use htmlcomb::scraper::{chroots, text};
use htmlcomb::selector::{nested, tag, with_attributes};

const PAGE: &str = r#"
<table class="catalog">
  <tr class="row in-stock"><td>Widget</td><td>$4.00</td></tr>
  <tr class="row out-of-stock"><td>Gadget</td><td>$9.00</td></tr>
  <tr class="row in-stock"><td>Gizmo</td><td>$2.50</td></tr>
</table>
"#;

fn main() {
    let in_stock: Vec<(String, String)> = scrape(PAGE, |s| {
        chroots(
            s,
            &nested(tag("table"), with_attributes("tr", vec![has_class("in-stock")])),
            |row| {
                let cells = chroots(row, &tag("td"), |cell| text(cell, &tag("td")))?;
                let name = cells.first()?.clone();
                let price = cells.get(1)?.clone();
                Some((name, price))
            },
        )
    })
    .expect("table always has at least one in-stock row");

    for (name, price) in &in_stock {
        println!("{name}: {price}");
    }
    assert_eq!(in_stock.len(), 2);
}

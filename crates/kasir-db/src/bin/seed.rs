//! # Seed Data Generator
//!
//! Populates the database with categories and products for development.
//!
//! ## Usage
//! ```bash
//! # Seed every catalog entry into ./kasir_dev.db (default)
//! cargo run -p kasir-db --bin seed
//!
//! # Limit how many products are generated
//! cargo run -p kasir-db --bin seed -- --count 20
//!
//! # Specify connection string (falls back to $DB_CONN)
//! cargo run -p kasir-db --bin seed -- --db sqlite://./data/kasir.db?mode=rwc
//! ```
//!
//! ## Generated Data
//! One category per catalog section below, each with a handful of
//! everyday minimarket products. Prices are whole rupiah; stock is
//! 10 - 110 units.

use std::env;
use kasir_core::{CategoryInput, ProductInput};
use kasir_db::{Database, DbConfig};

const DEFAULT_DB: &str = "sqlite://./kasir_dev.db?mode=rwc";

/// (category, description, products with base price)
const CATALOG: &[(&str, &str, &[(&str, i64)])] = &[
    (
        "Makanan",
        "Mie instan dan makanan ringan",
        &[
            ("Indomie Goreng", 3500),
            ("Indomie Soto", 3300),
            ("Mie Sedaap Goreng", 3400),
            ("Chitato Sapi Panggang", 11000),
            ("Qtela Singkong", 9000),
            ("Roti Tawar Sari Roti", 16000),
        ],
    ),
    (
        "Minuman",
        "Minuman botol dan kemasan",
        &[
            ("Teh Botol Sosro", 5000),
            ("Aqua 600ml", 4000),
            ("Le Minerale 600ml", 3500),
            ("Pocari Sweat 500ml", 8000),
            ("Kopi Kapal Api Sachet", 1500),
            ("Ultra Milk Coklat", 6500),
        ],
    ),
    (
        "Kebutuhan Rumah",
        "Sabun, deterjen, dan perlengkapan rumah",
        &[
            ("Sabun Lifebuoy", 4500),
            ("Rinso 800g", 23000),
            ("Sunlight 755ml", 16500),
            ("Pepsodent 190g", 14000),
            ("Tisu Paseo", 12500),
        ],
    ),
    (
        "Sembako",
        "Bahan pokok",
        &[
            ("Beras Pandan Wangi 5kg", 78000),
            ("Minyak Goreng Bimoli 1L", 19000),
            ("Gula Pasir Gulaku 1kg", 17500),
            ("Telur Ayam 1kg", 28000),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = usize::MAX;
    let mut db_url = env::var("DB_CONN").unwrap_or_else(|_| DEFAULT_DB.to_string());

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(usize::MAX);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_url = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kasir POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Maximum number of products to generate (default: all)");
                println!("  -d, --db <URL>     Connection string (default: $DB_CONN or {})", DEFAULT_DB);
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Kasir POS Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_url);
    println!();

    let db = Database::new(DbConfig::new(&db_url)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing products
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating catalog...");

    let mut generated = 0;
    let start = std::time::Instant::now();

    'catalog: for (category_name, description, products) in CATALOG {
        let category = db
            .categories()
            .create(&CategoryInput {
                name: category_name.to_string(),
                description: description.to_string(),
            })
            .await?;

        println!("  Category #{} {}", category.id, category.name);

        for (product_name, price) in products.iter() {
            if generated >= count {
                break 'catalog;
            }

            let input = ProductInput {
                name: product_name.to_string(),
                price: *price,
                stock: 10 + ((generated * 37) % 101) as i64,
                category_id: category.id,
            };

            if let Err(e) = db.products().create(&input).await {
                eprintln!("Failed to insert {}: {}", input.name, e);
                continue;
            }

            generated += 1;
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);

    // Verify search
    println!();
    println!("Verifying product search...");
    let search_results = db.products().get_all("indomie").await?;
    println!("  Search 'indomie': {} results", search_results.len());

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

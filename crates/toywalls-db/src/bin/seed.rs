//! # Seed Data Generator
//!
//! Populates the database with a demo tenant for development: stores,
//! warehouses, employees, a toy catalog and a month of synthetic sales.
//!
//! ## Usage
//! ```bash
//! # Seed one month of sales (default ~600)
//! cargo run -p toywalls-db --bin seed
//!
//! # Custom amount / database path
//! cargo run -p toywalls-db --bin seed -- --count 2000 --db ./data/toywalls.db
//! ```
//!
//! Generation is deterministic (index arithmetic, no RNG) so repeated runs
//! against fresh databases produce identical data.

use chrono::{Datelike, TimeZone, Utc};
use std::env;
use toywalls_core::{Employee, MonthWindow, Sale, Store, Toy, Warehouse};
use toywalls_db::{Database, DbConfig};
use uuid::Uuid;

/// Demo tenant everything is seeded under.
const DEMO_TENANT_ID: &str = "00000000-0000-0000-0000-000000000001";

const STORE_NAMES: &[&str] = &["Tienda Norte", "Tienda Centro", "Tienda Sur"];

const WAREHOUSE_NAMES: &[&str] = &["Bodega Principal", "Bodega Secundaria"];

const EMPLOYEES: &[(&str, &str)] = &[
    ("Marta Ruiz", "E-001"),
    ("Julián Pardo", "E-002"),
    ("Carolina Vélez", "E-003"),
    ("Andrés Mejía", "E-004"),
];

/// (name, price in centavos)
const TOYS: &[(&str, i64)] = &[
    ("Cubo mágico", 1590000),
    ("Oso de peluche", 4990000),
    ("Carro a control remoto", 12990000),
    ("Rompecabezas 1000 piezas", 3590000),
    ("Muñeca de trapo", 2790000),
    ("Set de bloques", 8990000),
    ("Pelota saltarina", 990000),
    ("Tren de madera", 6490000),
    ("Cometa", 1990000),
    ("Juego de mesa familiar", 7590000),
    ("Dinosaurio de goma", 2190000),
    ("Avión de juguete", 5390000),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 600;
    let mut db_path = String::from("./toywalls_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(600);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Toys Walls Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of sales to generate (default: 600)");
                println!("  -d, --db <PATH>    Database file path (default: ./toywalls_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🧸 Toys Walls Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!("Sales:    {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.sales().count_for_tenant(DEMO_TENANT_ID).await?;
    if existing > 0 {
        println!("⚠ Demo tenant already has {} sales", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let now = Utc::now();

    // Directory: stores, warehouses, employees
    let mut store_ids = Vec::new();
    for name in STORE_NAMES {
        let id = Uuid::new_v4().to_string();
        db.stores()
            .insert(&Store {
                id: id.clone(),
                tenant_id: DEMO_TENANT_ID.to_string(),
                name: name.to_string(),
                created_at: now,
            })
            .await?;
        store_ids.push(id);
    }

    let mut warehouse_ids = Vec::new();
    for name in WAREHOUSE_NAMES {
        let id = Uuid::new_v4().to_string();
        db.warehouses()
            .insert(&Warehouse {
                id: id.clone(),
                tenant_id: DEMO_TENANT_ID.to_string(),
                name: name.to_string(),
                created_at: now,
            })
            .await?;
        warehouse_ids.push(id);
    }

    let mut employee_ids = Vec::new();
    for (name, code) in EMPLOYEES {
        let id = Uuid::new_v4().to_string();
        db.employees()
            .insert(&Employee {
                id: id.clone(),
                tenant_id: DEMO_TENANT_ID.to_string(),
                name: name.to_string(),
                code: Some(code.to_string()),
                created_at: now,
            })
            .await?;
        employee_ids.push(id);
    }

    println!(
        "✓ Directory seeded: {} stores, {} warehouses, {} employees",
        store_ids.len(),
        warehouse_ids.len(),
        employee_ids.len()
    );

    // Catalog: one toy per entry; the last one stays unassigned so reports
    // exercise the skip path
    let mut toy_ids = Vec::new();
    for (idx, (name, price_cents)) in TOYS.iter().enumerate() {
        let id = Uuid::new_v4().to_string();
        let unassigned = idx == TOYS.len() - 1;
        db.toys()
            .insert(&Toy {
                id: id.clone(),
                tenant_id: DEMO_TENANT_ID.to_string(),
                name: name.to_string(),
                store_id: (!unassigned).then(|| store_ids[idx % store_ids.len()].clone()),
                warehouse_id: Some(warehouse_ids[idx % warehouse_ids.len()].clone()),
                price_cents: *price_cents,
                quantity: 50 + (idx as i64 * 7) % 40,
                created_at: now,
            })
            .await?;
        toy_ids.push(id);
    }

    println!("✓ Catalog seeded: {} toys", toy_ids.len());

    // A month of sales, spread deterministically over days and hours
    println!();
    println!("Generating sales...");

    let window = MonthWindow::containing(now);
    let start = std::time::Instant::now();
    let mut generated = 0usize;

    for i in 0..count {
        let toy_idx = i % toy_ids.len();
        let day = 1 + (i as u32 * 7) % window.days();
        let hour = (i as u32 * 5) % 24;
        let sold_at = Utc
            .with_ymd_and_hms(now.year(), now.month(), day, hour, (i as u32 * 11) % 60, 0)
            .single()
            .unwrap_or(now);

        // Every 9th sale has no employee, every 13th no quantity, every
        // 17th no price: the coercion and skip paths stay exercised
        let employee_id = (i % 9 != 0).then(|| employee_ids[i % employee_ids.len()].clone());
        let quantity = (i % 13 != 0).then(|| 1 + (i as i64 % 4));
        let unit_price = (i % 17 != 0).then(|| TOYS[toy_idx].1 as f64 / 100.0);

        db.sales()
            .record(&Sale {
                id: Uuid::new_v4().to_string(),
                tenant_id: DEMO_TENANT_ID.to_string(),
                toy_id: toy_ids[toy_idx].clone(),
                employee_id,
                unit_price,
                quantity,
                sold_at,
                created_at: now,
            })
            .await?;

        generated += 1;
        if generated % 200 == 0 {
            println!("  Generated {} sales...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} sales in {:?}", generated, elapsed);

    // Sanity check: the report fetch sees what we wrote
    let fetched = db.sales().fetch_month(DEMO_TENANT_ID, &window).await?;
    println!("  Month fetch returns {} enriched rows", fetched.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

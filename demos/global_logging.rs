//! Global registry example
//!
//! Demonstrates publishing a logger for the whole process and the adapter
//! shims that forward to it.
//!
//! Run with: cargo run --example global_logging

use zapper::adapters::{apm, grpc, GrpcConfig};
use zapper::{field, global, LoggerConfig, Result};

fn handle_request(id: i64) {
    global::info("request handled", &[field::int("request_id", id)]);
}

fn main() -> Result<()> {
    println!("=== Zapper - Global Logging Example ===\n");

    println!("1. Before initialization every call is a no-op:");
    handle_request(0);

    println!("\n2. After initialization:");
    global::init(&LoggerConfig::console("info"))?;
    handle_request(1);
    global::warnf(format_args!("cache hit ratio {:.1}%", 42.5));

    println!("\n3. Re-initializing replaces the logger:");
    global::init(&LoggerConfig {
        name: "json".into(),
        console_format: "json".into(),
        ..LoggerConfig::console("debug")
    })?;
    handle_request(2);

    println!("\n4. Adapter shims:");
    let rpc = grpc::init_global(&GrpcConfig::default());
    rpc.infof(format_args!("channel {} connected", "backend:443"));
    if rpc.v(2) {
        rpc.info(format_args!("verbose transport details"));
    }
    apm::global().errorf(format_args!("failed to send {} spans", 3));

    global::get().flush();

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

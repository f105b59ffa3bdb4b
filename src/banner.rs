//! Startup banner and shutdown summary display.

use std::net::SocketAddr;

use crate::consts::{AUTHOR, HOMEPAGE, REPO, ROUTE_CONCURRENT, ROUTE_SINGLE};
use crate::engine::concurrent::OutputOrder;

/// Server settings for display in the startup banner.
pub struct BannerInfo {
    pub addr: SocketAddr,
    pub max_workers: usize,
    pub order: OutputOrder,
}

fn order_label(order: OutputOrder) -> &'static str {
    match order {
        OutputOrder::Input => "input order",
        OutputOrder::Completion => "completion order",
    }
}

/// Render the startup banner.
pub fn render_banner(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║              S O R T D                ║
   ║     many arrays in, sorted arrays out ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
   repo      {}
   listen    http://{}
   routes    POST {}, POST {}
   workers   {} ({})
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        REPO,
        info.addr,
        ROUTE_SINGLE,
        ROUTE_CONCURRENT,
        info.max_workers,
        order_label(info.order),
    )
}

/// Print the startup banner with server info.
pub fn print_banner(info: &BannerInfo) {
    println!("{}", render_banner(info));
}

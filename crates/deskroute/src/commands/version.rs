pub fn run() -> anyhow::Result<()> {
    println!("deskroute {}", env!("CARGO_PKG_VERSION"));
    println!("Rule-based query routing for GST helpdesk workflows");
    Ok(())
}

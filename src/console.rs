//! Pretty terminal output with colors and badges.

use colored::Colorize;

// === Startup ===

pub fn print_banner() {
    println!();
    println!("{}", "╔═══════════════════════════════════════════════════════════╗".cyan());
    println!("{}", "║                                                           ║".cyan());
    println!("║     {}                              ║", "🛡  Bounty Admin Gate v0.1.0".bold().white());
    println!("║     {}      ║", "HS256 admin tokens for the bug-bounty back office".dimmed());
    println!("{}", "║                                                           ║".cyan());
    println!("{}", "╚═══════════════════════════════════════════════════════════╝".cyan());
    println!();
}

pub fn print_startup(addr: &str) {
    println!("{} {}", "✓".green().bold(), "Server ready".white().bold());
    println!("  {} {}", "→".dimmed(), format!("http://{}", addr).cyan().underline());
    println!();
    println!("{}", "Public:".white().bold());
    println!("  {} {}  {}", "POST".yellow(), "/api/admin/login".white(), "Issue admin token".dimmed());
    println!("  {} {}  {}", "GET ".green(), "/api/contests".white(), "List contests".dimmed());
    println!("  {} {}  {}", "GET ".green(), "/api/testimonials".white(), "List testimonials".dimmed());
    println!("  {} {}  {}", "POST".yellow(), "/api/contact".white(), "Send contact message".dimmed());
    println!("  {} {}  {}", "POST".yellow(), "/api/breach-proposals".white(), "Propose a breach".dimmed());
    println!();
    println!("{}", "Admin (Bearer token):".white().bold());
    println!("  {} {}  {}", "GET ".green(), "/api/admin/verify".white(), "Decode stored token".dimmed());
    println!("  {} {}  {}", "GET ".green(), "/api/admin/metrics".white(), "Auth telemetry".dimmed());
    println!("  {} {}  {}", "*   ".cyan(), "/api/admin/collections/:collection[/:id]".white(), "Manage records".dimmed());
    println!();
}

// === Badges ===

fn badge(text: &str, fg: colored::Color, bg: colored::Color) -> colored::ColoredString {
    format!(" {} ", text).color(fg).on_color(bg).bold()
}

// === Auth Events ===

pub fn log_login(sub: &str) {
    println!(
        "{} {} {} {}",
        badge("LOGIN", colored::Color::Black, colored::Color::Green),
        "sub:".dimmed(),
        sub.white(),
        "✓ token issued".green()
    );
}

pub fn log_login_failure(admin_id: &str) {
    println!(
        "{} {} {}",
        badge("LOGIN", colored::Color::White, colored::Color::Red),
        format!("id:{}", admin_id).yellow(),
        "✗ bad credentials".red()
    );
}

pub fn log_reject(reason: &str) {
    println!("{} {}", badge("DENY", colored::Color::White, colored::Color::Red), reason.red());
}

pub fn log_rate_limited(admin_id: &str, reason: &str) {
    println!(
        "{} {} {} {}",
        badge("RATE", colored::Color::Black, colored::Color::Yellow),
        format!("id:{}", admin_id).yellow(),
        "→".dimmed(),
        reason.yellow()
    );
}

// src/main.rs
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use fnb_admin::AppState;
use fnb_admin::config::Config;
use fnb_admin::crud::{Confirm, CrudPage, CrudResource};
use fnb_admin::guard::{Navigation, Route};
use fnb_admin::models::{OptionType, OrderStatus, VoucherType};
use fnb_admin::order_detail::LoadOutcome;
use fnb_admin::pages::{
    DashboardPage, LoginPage, OptionsPage, OrdersPage, ProductsPage, categories, vouchers,
};
use fnb_admin::pages::products::ProductDraft;
use fnb_admin::pages::vouchers::VoucherDraft;

#[derive(Parser)]
#[command(name = "fnb-admin", version, about = "Admin console for the FNB ordering backend")]
struct Cli {
    /// Do not ask before deleting.
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store the admin token.
    Login {
        #[arg(long, short = 'u')]
        username: String,
        #[arg(long, short = 'p', env = "FNB_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored token.
    Logout,
    /// Show the management sections.
    Dashboard,
    #[command(subcommand)]
    Categories(CategoryCommand),
    #[command(subcommand)]
    Products(ProductCommand),
    #[command(subcommand)]
    Options(OptionCommand),
    #[command(subcommand)]
    Vouchers(VoucherCommand),
    #[command(subcommand)]
    Orders(OrderCommand),
}

#[derive(Subcommand)]
enum CategoryCommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 0)]
        display_order: i32,
    },
}

#[derive(Args)]
struct ProductFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    price: Option<f64>,
    /// Absolute URL, server path, or an emoji.
    #[arg(long)]
    image: Option<String>,
    /// Category id.
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    best_seller: Option<bool>,
    #[arg(long)]
    out_of_stock: Option<bool>,
}

impl ProductFields {
    fn apply(self, draft: &mut ProductDraft) {
        if let Some(v) = self.name {
            draft.name = v;
        }
        if let Some(v) = self.description {
            draft.description = v;
        }
        if let Some(v) = self.price {
            draft.base_price = v;
        }
        if let Some(v) = self.image {
            draft.image_url = v;
        }
        if let Some(v) = self.category {
            draft.category_id = v;
        }
        if let Some(v) = self.best_seller {
            draft.is_best_seller = v;
        }
        if let Some(v) = self.out_of_stock {
            draft.is_out_of_stock = v;
        }
    }
}

#[derive(Subcommand)]
enum ProductCommand {
    List,
    Create(ProductFields),
    Update {
        id: i32,
        #[command(flatten)]
        fields: ProductFields,
    },
    Delete {
        id: i32,
    },
    /// Replace the option groups linked to a product.
    LinkOptions {
        id: i32,
        option_ids: Vec<i32>,
    },
    /// Upload an image and print its URL. With `--product`, also set it on that product.
    UploadImage {
        path: PathBuf,
        #[arg(long)]
        product: Option<i32>,
    },
}

#[derive(Subcommand)]
enum OptionCommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        /// CHON_1 or CHON_NHIEU.
        #[arg(long, default_value = "CHON_NHIEU")]
        kind: OptionType,
    },
    Delete {
        id: i32,
    },
    AddValue {
        group_id: i32,
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        price: f64,
    },
    DeleteValue {
        id: i32,
    },
}

#[derive(Args)]
struct VoucherFields {
    #[arg(long)]
    code: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// fixed or percentage.
    #[arg(long)]
    kind: Option<VoucherType>,
    #[arg(long)]
    value: Option<String>,
    #[arg(long)]
    min_order: Option<String>,
    /// Cap for percentage vouchers. Empty or 0 means no cap.
    #[arg(long)]
    max_discount: Option<String>,
    #[arg(long)]
    active: Option<bool>,
}

impl VoucherFields {
    fn apply(self, draft: &mut VoucherDraft) {
        if let Some(v) = self.code {
            draft.code = v;
        }
        if let Some(v) = self.description {
            draft.description = v;
        }
        if let Some(kind) = self.kind {
            draft.set_kind(kind);
        }
        if let Some(v) = self.value {
            draft.set_value_input(&v);
        }
        if let Some(v) = self.min_order {
            draft.set_min_order_input(&v);
        }
        if let Some(v) = self.max_discount {
            draft.set_max_discount_input(&v);
        }
        if let Some(v) = self.active {
            draft.is_active = v;
        }
    }
}

#[derive(Subcommand)]
enum VoucherCommand {
    List {
        /// Also show what each voucher would take off an order of this subtotal.
        #[arg(long)]
        preview: Option<f64>,
    },
    Create(VoucherFields),
    Update {
        id: i32,
        #[command(flatten)]
        fields: VoucherFields,
    },
    Delete {
        id: i32,
    },
}

#[derive(Subcommand)]
enum OrderCommand {
    List,
    Show {
        id: i32,
    },
    /// Status is a wire value (DANG_GIAO) or a name (delivering).
    SetStatus {
        id: i32,
        status: OrderStatus,
    },
}

fn stdin_confirm(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(e) => {
            log::warn!("could not read confirmation: {e}");
            false
        }
    }
}

fn always_yes(_prompt: &str) -> bool {
    true
}

/// Turns a redirect to the login page into a failing exit.
fn check(nav: Navigation) -> anyhow::Result<()> {
    match nav {
        Navigation::Redirect(Route::Login) => {
            bail!("not logged in or session expired, please run `fnb-admin login`")
        }
        _ => Ok(()),
    }
}

/// Prints the page and fails when the last action left a message behind.
fn finish<R: CrudResource>(page: &CrudPage<R>, rendered: String) -> anyhow::Result<()> {
    print!("{rendered}");
    if let Some(error) = page.form().and_then(|f| f.error.as_deref()) {
        bail!("{error}");
    }
    if let Some(notice) = page.notice() {
        bail!("{notice}");
    }
    Ok(())
}

async fn run_categories(state: &AppState, cmd: CategoryCommand) -> anyhow::Result<()> {
    let mut page = categories::page(state.client.clone());
    check(page.enter().await)?;
    if let CategoryCommand::Create {
        name,
        display_order,
    } = cmd
    {
        page.open_create();
        if let Some(draft) = page.draft_mut() {
            draft.name = name;
            draft.display_order = display_order;
        }
        check(page.submit().await)?;
    }
    let rendered = page.render();
    finish(&page, rendered)
}

async fn run_products(
    state: &AppState,
    cmd: ProductCommand,
    confirm: &dyn Confirm,
) -> anyhow::Result<()> {
    let mut page = ProductsPage::new(state.client.clone());
    check(page.enter().await)?;
    match cmd {
        ProductCommand::List => {}
        ProductCommand::Create(fields) => {
            page.crud_mut().open_create();
            if let Some(draft) = page.crud_mut().draft_mut() {
                fields.apply(draft);
            }
            check(page.crud_mut().submit().await)?;
        }
        ProductCommand::Update { id, fields } => {
            if !page.crud_mut().open_edit(id) {
                bail!("product {id} not found");
            }
            if let Some(draft) = page.crud_mut().draft_mut() {
                fields.apply(draft);
            }
            check(page.crud_mut().submit().await)?;
        }
        ProductCommand::Delete { id } => check(page.delete(id, confirm).await)?,
        ProductCommand::LinkOptions { id, option_ids } => {
            if !page.open_options(id) {
                bail!("product {id} not found");
            }
            if let Some(membership) = page.membership_mut() {
                for current in membership.selected() {
                    if !option_ids.contains(&current) {
                        membership.toggle(current);
                    }
                }
                for wanted in &option_ids {
                    if !membership.contains(*wanted) {
                        membership.toggle(*wanted);
                    }
                }
            }
            check(page.save_options().await)?;
        }
        ProductCommand::UploadImage { path, product } => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());
            if let Some(id) = product {
                if !page.crud_mut().open_edit(id) {
                    bail!("product {id} not found");
                }
            }
            check(page.upload_image(&file_name, bytes).await)?;
            if let Some(form) = page.crud().form() {
                if !form.draft.image_url.is_empty() {
                    println!("{}", form.draft.image_url);
                }
            }
            if product.is_some() && page.crud().notice().is_none() {
                check(page.crud_mut().submit().await)?;
            }
        }
    }
    let rendered = page.render();
    finish(page.crud(), rendered)
}

async fn run_options(
    state: &AppState,
    cmd: OptionCommand,
    confirm: &dyn Confirm,
) -> anyhow::Result<()> {
    let mut page = OptionsPage::new(state.client.clone());
    check(page.enter().await)?;
    match cmd {
        OptionCommand::List => {}
        OptionCommand::Create { name, kind } => {
            page.crud_mut().open_create();
            if let Some(draft) = page.crud_mut().draft_mut() {
                draft.name = name;
                draft.kind = kind;
            }
            check(page.crud_mut().submit().await)?;
        }
        OptionCommand::Delete { id } => check(page.delete_group(id, confirm).await)?,
        OptionCommand::AddValue {
            group_id,
            name,
            price,
        } => check(page.add_value(group_id, &name, price).await)?,
        OptionCommand::DeleteValue { id } => check(page.delete_value(id, confirm).await)?,
    }
    let rendered = page.render();
    finish(page.crud(), rendered)
}

async fn run_vouchers(
    state: &AppState,
    cmd: VoucherCommand,
    confirm: &dyn Confirm,
) -> anyhow::Result<()> {
    let mut page = vouchers::page(state.client.clone());
    check(page.enter().await)?;
    match cmd {
        VoucherCommand::List { preview } => {
            if let Some(sub_total) = preview {
                let rendered = page.render();
                finish(&page, rendered)?;
                print!("\n{}", vouchers::discount_preview(page.items(), sub_total));
                return Ok(());
            }
        }
        VoucherCommand::Create(fields) => {
            page.open_create();
            if let Some(draft) = page.draft_mut() {
                fields.apply(draft);
            }
            check(page.submit().await)?;
        }
        VoucherCommand::Update { id, fields } => {
            if !page.open_edit(id) {
                bail!("voucher {id} not found");
            }
            if let Some(draft) = page.draft_mut() {
                fields.apply(draft);
            }
            check(page.submit().await)?;
        }
        VoucherCommand::Delete { id } => check(page.delete(id, confirm).await)?,
    }
    let rendered = page.render();
    finish(&page, rendered)
}

async fn run_orders(state: &AppState, cmd: OrderCommand) -> anyhow::Result<()> {
    let mut page = OrdersPage::new(state.client.clone());
    check(page.enter().await)?;
    match cmd {
        OrderCommand::List => {}
        OrderCommand::Show { id } => {
            let outcome = page.show(id).await;
            check(outcome.navigation())?;
            print!("{}", page.detail().render());
            if outcome == LoadOutcome::Failed {
                bail!("could not load order {id}");
            }
            return Ok(());
        }
        OrderCommand::SetStatus { id, status } => {
            check(page.set_status(id, status).await)?;
            if page.crud().notice().is_none() {
                match page.status_of(id) {
                    Some(now) => println!("Order #{id}: {}", now.label()),
                    None => println!("Order #{id} is no longer listed"),
                }
            }
        }
    }
    let rendered = page.render();
    finish(page.crud(), rendered)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let state = AppState::from_config(Config::from_env());
    let confirm: &dyn Confirm = if cli.yes {
        &always_yes
    } else {
        &stdin_confirm
    };

    match cli.command {
        Command::Login { username, password } => {
            let mut page = LoginPage::new();
            page.username = username;
            page.password = password;
            match page.submit(&state.client).await {
                Navigation::Redirect(route) => println!("Logged in, continue at {route}"),
                Navigation::Stay => {
                    bail!("{}", page.error().unwrap_or("login failed"))
                }
            }
        }
        Command::Logout => {
            let mut page = DashboardPage::new(state.client.clone());
            page.logout();
            println!("Logged out");
        }
        Command::Dashboard => {
            let mut page = DashboardPage::new(state.client.clone());
            check(page.enter())?;
            print!("{}", page.render());
        }
        Command::Categories(cmd) => run_categories(&state, cmd).await?,
        Command::Products(cmd) => run_products(&state, cmd, confirm).await?,
        Command::Options(cmd) => run_options(&state, cmd, confirm).await?,
        Command::Vouchers(cmd) => run_vouchers(&state, cmd, confirm).await?,
        Command::Orders(cmd) => run_orders(&state, cmd).await?,
    }
    Ok(())
}

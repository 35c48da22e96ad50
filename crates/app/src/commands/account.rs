use clap::{Args, ValueEnum};
use comanda::users::{RegisterRequest, Role};
use comanda_app::{api::ApiError, context::AppContext};

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "COMANDA_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AccountRole {
    /// Order food
    Customer,
    /// Manage a restaurant
    Owner,
}

impl From<AccountRole> for Role {
    fn from(role: AccountRole) -> Self {
        match role {
            AccountRole::Customer => Role::Client,
            AccountRole::Owner => Role::Owner,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct RegisterArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Account email
    #[arg(long)]
    email: String,

    /// Account password, at least 6 characters
    #[arg(long, env = "COMANDA_PASSWORD", hide_env_values = true)]
    password: String,

    /// Password again; defaults to the password
    #[arg(long, env = "COMANDA_PASSWORD_CONFIRMATION", hide_env_values = true)]
    password_confirmation: Option<String>,

    /// Kind of account
    #[arg(long, value_enum, default_value_t = AccountRole::Customer)]
    role: AccountRole,

    /// Contact phone
    #[arg(long)]
    phone: Option<String>,

    /// Default delivery address
    #[arg(long)]
    address: Option<String>,
}

pub(crate) async fn register(context: &mut AppContext, args: RegisterArgs) -> Result<(), String> {
    let request = RegisterRequest {
        name: args.name,
        email: args.email,
        password_confirmation: args
            .password_confirmation
            .unwrap_or_else(|| args.password.clone()),
        password: args.password,
        role: args.role.into(),
        phone: args.phone,
        address: args.address,
    };

    let session = context
        .accounts
        .register(&request)
        .await
        .map_err(|error| format!("failed to register: {error}"))?;

    if let Some(user) = session.user() {
        println!("registered {} ({})", user.name, user.role);
    }

    context.sign_in(session);

    Ok(())
}

pub(crate) async fn login(context: &mut AppContext, args: LoginArgs) -> Result<(), String> {
    let session = context
        .accounts
        .login(&args.email, &args.password)
        .await
        .map_err(|error| format!("failed to sign in: {error}"))?;

    if let Some(user) = session.user() {
        println!("signed in as {} ({})", user.name, user.role);
    }

    context.sign_in(session);

    Ok(())
}

pub(crate) async fn logout(context: &mut AppContext) {
    context.accounts.logout(&context.session).await;
    context.sign_out();

    println!("signed out");
}

pub(crate) async fn whoami(context: &mut AppContext) -> Result<(), String> {
    if !context.session.is_signed_in() {
        println!("not signed in");
        return Ok(());
    }

    match context.api.current_user().await {
        Ok(user) => {
            println!("name: {}", user.name);
            println!("email: {}", user.email);
            println!("role: {}", user.role);
            println!("address: {}", user.address.as_deref().unwrap_or("none"));
            Ok(())
        }
        Err(ApiError::Unauthorized) => {
            context.sign_out();
            Err(ApiError::Unauthorized.to_string())
        }
        Err(error) => Err(format!("failed to fetch user: {error}")),
    }
}

use clap::{Arg, Command};
use diesel::{Connection, PgConnection};
use nivasa_backend::{
    config::Config,
    db::{
        self,
        enums::{ResidentType, UserRole, UserStatus},
        models::{NewUser, api::error_codes},
        repositories::UserRepo,
    },
    error::AppError,
    init_tracing,
    services::admin_service::user_status_change,
    validation::{auth::normalize_email, rules::validate_phone},
};

fn cli() -> Command {
    Command::new("nivasa-admin")
        .about("Nivasa administration tool")
        .subcommand_required(true)
        .subcommand(
            Command::new("create")
                .about("Create an approved admin account")
                .arg(
                    Arg::new("name")
                        .long("name")
                        .value_name("NAME")
                        .required(true),
                )
                .arg(
                    Arg::new("email")
                        .long("email")
                        .value_name("EMAIL")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .value_name("PASSWORD")
                        .help("At least 6 characters")
                        .required(true),
                )
                .arg(
                    Arg::new("phone")
                        .long("phone")
                        .value_name("PHONE")
                        .help("10 digit mobile number")
                        .required(true),
                )
                .arg(
                    Arg::new("wing")
                        .long("wing")
                        .value_name("WING")
                        .default_value("ADMIN"),
                )
                .arg(
                    Arg::new("flat-number")
                        .long("flat-number")
                        .value_name("FLAT")
                        .default_value("OFFICE"),
                ),
        )
}

fn arg(matches: &clap::ArgMatches, name: &str) -> Result<String, AppError> {
    matches
        .get_one::<String>(name)
        .map(|value| value.trim().to_string())
        .ok_or_else(|| AppError::validation(format!("--{} is required", name)))
}

fn create_admin(config: &Config, matches: &clap::ArgMatches) -> Result<(), AppError> {
    let name = arg(matches, "name")?;
    let email = normalize_email(&arg(matches, "email")?);
    let password = arg(matches, "password")?;
    let phone = arg(matches, "phone")?;

    if name.is_empty() {
        return Err(AppError::validation("Name cannot be empty"));
    }
    if !email.contains('@') {
        return Err(AppError::validation("Invalid email address"));
    }
    if password.len() < 6 {
        return Err(AppError::validation(
            "Password must be at least 6 characters",
        ));
    }
    validate_phone(&phone)
        .map_err(|_| AppError::validation("Phone number must be exactly 10 digits"))?;

    let pool = db::create_pool(&config.database())?;
    let mut pooled = pool.get()?;
    let conn: &mut PgConnection = &mut pooled;

    if UserRepo::exists_by_email(conn, &email)? {
        return Err(AppError::duplicate_with_code(
            "User with this email already exists",
            Some("email".to_string()),
            error_codes::USER_EMAIL_EXISTS,
        ));
    }

    let password_hash = bcrypt::hash(&password, config.auth().bcrypt_cost)?;
    let new_user = NewUser {
        name,
        email,
        password_hash,
        phone,
        wing: arg(matches, "wing")?.to_uppercase(),
        flat_number: arg(matches, "flat-number")?,
        resident_type: ResidentType::Owner,
        role: UserRole::Admin,
        status: UserStatus::Approved,
        occupation: None,
    };

    let admin = conn.transaction::<_, AppError, _>(|conn| {
        let user = UserRepo::insert(conn, &new_user)?;
        // 自己批准自己，保持 approved_by/approved_at 非空
        let change =
            user_status_change(UserStatus::Approved, None, user.id, chrono::Utc::now());
        Ok(UserRepo::update_status(conn, user.id, &change)?)
    })?;

    tracing::info!(user_id = %admin.id, email = %admin.email, "Admin account created");
    println!("Created admin {} <{}> ({})", admin.name, admin.email, admin.id);
    Ok(())
}

fn main() {
    let matches = cli().get_matches();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    init_tracing(&config);

    let result = match matches.subcommand() {
        Some(("create", sub)) => create_admin(&config, sub),
        _ => Err(AppError::validation("Unknown command")),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

//! Identity commands. The CLI plays the external identity provider: it
//! owns user records and decides who the core acts as.

use marquee_core::MarqueeService;
use marquee_storage::{CreateUserParams, StoreError};

use crate::config::CliConfig;

pub async fn cmd_user_register(
    svc: &MarqueeService,
    email: String,
    name: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let user_id = match svc
        .store
        .create_user(&CreateUserParams {
            name,
            email: email.clone(),
        })
        .await
    {
        Ok(user_id) => user_id,
        Err(StoreError::AlreadyExists) => {
            return Err(format!("a user with email {email} is already registered").into())
        }
        Err(e) => return Err(e.into()),
    };

    println!("✓ Registered {}", email.to_lowercase());
    println!("  ID: {}", user_id.0);
    Ok(())
}

pub async fn cmd_user_use(
    svc: &MarqueeService,
    mut config: CliConfig,
    email: String,
) -> Result<(), Box<dyn std::error::Error>> {
    // only an existing registration can become the default identity
    let user = match svc.store.get_user_by_email(&email).await {
        Ok(user) => user,
        Err(StoreError::NotFound) => {
            return Err(format!(
                "no registered user with email {email}; run 'marquee user register' first"
            )
            .into())
        }
        Err(e) => return Err(e.into()),
    };

    config.current_user = Some(user.email.clone());
    config.save()?;

    println!("✓ Acting as {}", user.email);
    Ok(())
}

pub fn cmd_user_current(config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    match &config.current_user {
        Some(email) => println!("{email}"),
        None => println!("No identity configured. Use 'marquee user use <email>'."),
    }
    Ok(())
}

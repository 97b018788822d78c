use mealplanner_shared::{Actor, Error};
use mealplanner_user::{ChangePasswordInput, LoginInput, Status};
use temp_dir::TempDir;

mod helpers;

fn login_input(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: email.to_owned(),
        password: password.to_owned(),
    }
}

#[tokio::test]
async fn test_login_failure() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let resp = cmd
        .login(login_input("john.doe@mealplanner.localhost", "my_password"))
        .await;
    assert_eq!(resp.unwrap_err().to_string(), "Invalid email or password");

    let user = helpers::create_user(&cmd, "john.doe").await?;

    let resp = cmd
        .login(login_input("john.doe@mealplanner.localhost", "my_password3"))
        .await;
    assert!(matches!(resp.unwrap_err(), Error::Unauthorized(_)));

    let resp = cmd
        .login(login_input("john.doe@mealplanner.localhos", "my_password"))
        .await;
    assert_eq!(resp.unwrap_err().to_string(), "Invalid email or password");

    let resp = cmd
        .login(login_input("John.Doe@mealplanner.localhost", "my_password"))
        .await?;
    assert_eq!(resp.id, user);

    Ok(())
}

#[tokio::test]
async fn test_login_suspended() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let user = helpers::create_user(&cmd, "john.doe").await?;

    cmd.set_status(&user, Status::Suspended).await?;

    let resp = cmd
        .login(login_input("john.doe@mealplanner.localhost", "my_password"))
        .await;
    assert!(matches!(resp.unwrap_err(), Error::Forbidden));

    cmd.set_status(&user, Status::Active).await?;
    cmd.login(login_input("john.doe@mealplanner.localhost", "my_password"))
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_change_password() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let user = helpers::create_user(&cmd, "john.doe").await?;

    let err = cmd
        .change_password(
            &user,
            ChangePasswordInput {
                current_password: "wrong_password".to_owned(),
                new_password: "new_password".to_owned(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::BadRequest(_)));

    cmd.change_password(
        &user,
        ChangePasswordInput {
            current_password: "my_password".to_owned(),
            new_password: "new_password".to_owned(),
        },
    )
    .await?;

    assert!(
        cmd.login(login_input("john.doe@mealplanner.localhost", "my_password"))
            .await
            .is_err()
    );
    cmd.login(login_input("john.doe@mealplanner.localhost", "new_password"))
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_delete_user() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let admin = helpers::create_user(&cmd, "admin").await?;
    let user = helpers::create_user(&cmd, "john.doe").await?;

    let err = cmd.delete(&Actor::user(&user), &admin).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden));

    let err = cmd.delete(&Actor::admin(&admin), &admin).await.unwrap_err();
    assert!(matches!(err, Error::BadRequest(_)));

    cmd.delete(&Actor::admin(&admin), &user).await?;
    assert!(mealplanner_user::find(&cmd, &user).await?.is_none());
    assert!(mealplanner_user::profile(&cmd, &user).await?.is_none());

    let err = cmd.delete(&Actor::admin(&admin), &user).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

use super::form::{bind_form, FormSetup, FormValues};
use super::{Mount, Teardown};
use crate::errors::ClientError;
use crate::models::{Credentials, ProfileRegistration, Registration, Session};
use crate::state::AppContext;
use tracing::warn;

const LOGIN: FormSetup = FormSetup {
    form: "loginForm",
    message: "loginMsg",
    fields: &["email", "password"],
    required: &["email", "password"],
    required_message: "Please enter your email and password.",
    success_message: "Welcome back!",
    failure_prefix: "Could not log in: ",
    follow_up: "#/dashboard",
};

const REGISTER: FormSetup = FormSetup {
    form: "registerForm",
    message: "registerMsg",
    fields: &["firstName", "lastName", "age", "email", "password"],
    required: &["firstName", "lastName", "age", "email", "password"],
    required_message: "Please fill in every field.",
    success_message: "Registration successful",
    failure_prefix: "Could not register: ",
    follow_up: "#/login",
};

const RECOVER: FormSetup = FormSetup {
    form: "recoverForm",
    message: "recoverMsg",
    fields: &["email"],
    required: &["email"],
    required_message: "Please enter your email.",
    success_message: "Check your inbox for recovery instructions.",
    failure_prefix: "Could not send recovery email: ",
    follow_up: "#/login",
};

const HOME: FormSetup = FormSetup {
    form: "registerForm",
    message: "registerMsg",
    fields: &["username", "password"],
    required: &["username", "password"],
    required_message: "Please enter a username and password.",
    success_message: "Registration successful",
    failure_prefix: "Could not register: ",
    follow_up: "#/board",
};

pub fn init_login(mount: &Mount, ctx: &AppContext) -> Teardown {
    bind_form(mount, ctx, LOGIN, |values: FormValues, ctx: AppContext| async move {
        let credentials = Credentials {
            email: values.get("email").to_string(),
            password: values.get("password").to_string(),
        };
        let payload = ctx.auth.login(&credentials).await?;
        match Session::from_login(&payload) {
            Some(session) => ctx.session.sign_in(session),
            None => warn!("login response carried no user id"),
        }
        Ok::<(), ClientError>(())
    })
}

pub fn init_register(mount: &Mount, ctx: &AppContext) -> Teardown {
    bind_form(mount, ctx, REGISTER, |values: FormValues, ctx: AppContext| async move {
        let age = values
            .get("age")
            .parse::<u32>()
            .map_err(|_| ClientError::validation("Age must be a whole number."))?;
        let registration = Registration::Profile(ProfileRegistration {
            first_name: values.get("firstName").to_string(),
            last_name: values.get("lastName").to_string(),
            age,
            email: values.get("email").to_string(),
            password: values.get("password").to_string(),
        });
        ctx.auth.register(&registration).await.map(drop)
    })
}

pub fn init_recover(mount: &Mount, ctx: &AppContext) -> Teardown {
    bind_form(mount, ctx, RECOVER, |values: FormValues, ctx: AppContext| async move {
        ctx.auth.recover_password(values.get("email")).await.map(drop)
    })
}

/// Sign-up form of the todo variant; leads straight to the board.
pub fn init_home(mount: &Mount, ctx: &AppContext) -> Teardown {
    bind_form(mount, ctx, HOME, |values: FormValues, ctx: AppContext| async move {
        let registration = Registration::Account {
            username: values.get("username").to_string(),
            password: values.get("password").to_string(),
        };
        ctx.auth.register(&registration).await.map(drop)
    })
}

use std::sync::Arc;
use log::warn;
use rpassword::prompt_password;
use tourbook::api::ApiClient;
use tourbook::authenticator::Credentials;
use tourbook::bookings::{BookingClient, BookingForm, CustomerBooking, GuideBooking};
use tourbook::error_exit;
use tourbook::registration::{RegistrationClient, UserRegistration};
use tourbook::role::Role;
use tourbook::session_store::{SessionError, SessionStore};
use crate::cli::{BookingsCommand, RegisterCommand, RegistrationArgs};

pub async fn login(session: &dyn SessionStore, username: &str) {
    let password = prompt_password("Password: ")
        .unwrap_or_else(|e| error_exit!("could not read password: {}", e));
    let credentials = Credentials::new(username, password)
        .unwrap_or_else(|e| error_exit!("{e}"));
    match session.login(&credentials).await {
        Ok(Some(role)) => println!(
            "Logged in as {} ({role}), home: {}",
            credentials.username(),
            role.home_path(),
        ),
        Ok(None) => println!("Logged in, but the issued token could not be read"),
        Err(SessionError::Authentication(e)) => error_exit!("{}", e.reason()),
        Err(e) => error_exit!("{e}"),
    }
}

pub async fn logout(session: &dyn SessionStore) {
    session.logout()
        .await
        .unwrap_or_else(|e| error_exit!("{e}"));
    println!("Logged out");
}

pub async fn whoami(session: &dyn SessionStore) {
    let session = session.session().await;
    match session.identity() {
        Some(identity) => println!(
            "{} ({}), session valid until {}",
            identity.subject,
            identity.role,
            identity.expires_at,
        ),
        None if session.is_authenticated() => println!("Logged in with an unreadable token"),
        None => println!("Not logged in"),
    }
}

pub async fn bookings(
    api: ApiClient,
    session: Arc<dyn SessionStore>,
    command: BookingsCommand,
) {
    let role = session.session().await.role();
    let client = BookingClient::new(api, session);
    match command {
        BookingsCommand::Mine => match role {
            Some(Role::Customer) => client.customer_bookings()
                .await
                .unwrap_or_else(|e| error_exit!("{e}"))
                .iter()
                .for_each(print_customer_booking),
            Some(Role::Guide) => client.guide_bookings()
                .await
                .unwrap_or_else(|e| error_exit!("{e}"))
                .iter()
                .for_each(print_guide_booking),
            Some(Role::Admin) => error_exit!("administrators have no bookings"),
            None => error_exit!("log in as a customer or a guide first"),
        },
        BookingsCommand::Available => client.available_bookings()
            .await
            .unwrap_or_else(|e| error_exit!("{e}"))
            .iter()
            .for_each(print_guide_booking),
        BookingsCommand::Create { date, category } => {
            let booking = client
                .create_booking(&BookingForm { booking_date: date, tour_category: category })
                .await
                .unwrap_or_else(|e| error_exit!("{e}"));
            print_customer_booking(&booking);
        },
        BookingsCommand::Delete { id } => {
            client.delete_booking(id)
                .await
                .unwrap_or_else(|e| error_exit!("{e}"));
            println!("Booking {id} deleted");
        },
        BookingsCommand::Claim { id } => {
            client.claim_booking(id)
                .await
                .unwrap_or_else(|e| error_exit!("{e}"));
            println!("Booking {id} is yours");
        },
    }
}

pub async fn register(api: ApiClient, command: RegisterCommand) {
    let client = RegistrationClient::new(api);
    let registered = match command {
        RegisterCommand::Customer { user } => {
            let registration = read_registration(user, Role::Customer);
            client.register_customer(&registration).await
        },
        RegisterCommand::Guide { user, tour_category } => {
            let registration = read_registration(user, Role::Guide);
            client.register_guide(&registration, tour_category).await
        },
    }.unwrap_or_else(|e| error_exit!("{e}"));
    println!(
        "Registered {} {} with id {}",
        registered.user.firstname,
        registered.user.lastname,
        registered.id,
    );
}

fn read_registration(user: RegistrationArgs, role: Role) -> UserRegistration {
    let password = prompt_password("Password: ")
        .unwrap_or_else(|e| error_exit!("could not read password: {}", e));
    let confirmation = prompt_password("Repeat the password: ")
        .unwrap_or_else(|e| error_exit!("could not read password: {}", e));
    if confirmation != password {
        error_exit!("the passwords do not match")
    }
    if password.trim() != password {
        warn!("the password has leading or trailing whitespace characters");
    }
    UserRegistration {
        username: user.username,
        password,
        firstname: user.firstname,
        lastname: user.lastname,
        email: user.email,
        vat: user.vat,
        date_of_birth: user.date_of_birth,
        gender: user.gender,
        nationality: user.nationality,
        role,
    }
}

fn print_customer_booking(booking: &CustomerBooking) {
    println!(
        "#{} {} {} {:.2} guide: {}",
        booking.id,
        booking.booking_date,
        booking.tour_category.map(|c| c.as_str()).unwrap_or("-"),
        booking.tour_price,
        booking.guide_id
            .as_ref()
            .map(|_| booking.guide_lastname.as_str())
            .unwrap_or("none yet"),
    );
}

fn print_guide_booking(booking: &GuideBooking) {
    println!(
        "#{} {} {} {:.2} customer: {}",
        booking.id,
        booking.booking_date,
        booking.tour_category.map(|c| c.as_str()).unwrap_or("-"),
        booking.tour_price,
        booking.customer_lastname,
    );
}

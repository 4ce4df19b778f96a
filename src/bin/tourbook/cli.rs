use std::path::PathBuf;
use clap::{Args, Parser, Subcommand};
use time::Date;
use tourbook::bin_constants::DEFAULT_CONFIG_FILE;
use tourbook::bookings::TourCategory;
use tourbook::registration::Gender;
use tourbook::serde::iso_date::ISO_DATE_FORMAT;

#[derive(Clone, Debug, Parser)]
#[command(version, author, about)]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: PathBuf,

    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Log in, prompting for the password, and remember the session
    Login {
        username: String,
    },

    /// Forget the remembered session
    Logout,

    /// Show who is logged in
    Whoami,

    /// Work with tour bookings
    Bookings {
        #[command(subcommand)]
        command: BookingsCommand,
    },

    /// Sign up a new user
    Register {
        #[command(subcommand)]
        command: RegisterCommand,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum BookingsCommand {
    /// Bookings of the logged-in customer or guide
    Mine,

    /// Bookings without a guide
    Available,

    /// Book a tour
    Create {
        #[arg(long, value_parser = parse_date)]
        date: Date,

        #[arg(long)]
        category: TourCategory,
    },

    /// Cancel a booking
    Delete {
        id: i64,
    },

    /// Guide a booking
    Claim {
        id: i64,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum RegisterCommand {
    Customer {
        #[command(flatten)]
        user: RegistrationArgs,
    },

    Guide {
        #[command(flatten)]
        user: RegistrationArgs,

        #[arg(long)]
        tour_category: TourCategory,
    },
}

#[derive(Args, Clone, Debug)]
pub struct RegistrationArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub firstname: String,

    #[arg(long)]
    pub lastname: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub vat: String,

    #[arg(long, value_parser = parse_date)]
    pub date_of_birth: Date,

    #[arg(long)]
    pub gender: Gender,

    #[arg(long)]
    pub nationality: String,
}

fn parse_date(value: &str) -> Result<Date, String> {
    Date::parse(value, ISO_DATE_FORMAT)
        .map_err(|_| format!("\"{value}\" is not a YYYY-MM-DD date"))
}

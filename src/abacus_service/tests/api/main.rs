mod auth;
mod calculator;
mod helpers;

mod health;
mod helpers;
mod session;

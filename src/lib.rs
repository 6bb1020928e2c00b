pub mod app_state;
pub mod auth;
pub mod config;
pub mod contact;
pub mod db;
pub mod email;
pub mod entities;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod mailer;
pub mod openapi;
pub mod passwords;
pub mod repositories;
pub mod routes;
pub mod summaries;
pub mod summarizer;
pub mod translator;

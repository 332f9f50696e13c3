// Application layer: use cases sitting between the API adapter and the domain

pub mod dto;
pub mod team_service;

pub use team_service::TeamService;

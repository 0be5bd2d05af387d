//! # ratecard-service
//!
//! Application layer: rate search, rate card maintenance, reference data,
//! users and authentication, and the activity log.

pub mod dto;
pub mod services;

pub use services::{
    actor_from_claims, ActivityService, ActivitySettings, AuthService, DashboardService,
    HealthService, PortService, RateSearchService, RateService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, ShippingLineService, UserService,
};

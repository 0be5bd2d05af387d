//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AddNoteRequest, CreatePortRequest, CreateRatesRequest, CreateShippingLineRequest,
    CreateUserRequest, HistoricalActivityQuery, LoginRequest, NoteInput, RateSearchQuery,
    RecentActivityQuery, SearchTermQuery, UpdatePortRequest, UpdateRateRequest,
    UpdateShippingLineRequest, UpdateUserRequest,
};

pub use responses::{
    ActivityActorResponse, ActivityResponse, CacheHealth, CreateRatesResponse,
    DashboardStats, HealthChecks, HealthResponse, LoginResponse, NoteResponse, PortResponse,
    RateAdminFields, RateHistoryResponse, RateRow, RateSearchResponse, ReadinessResponse,
    SearchHit, ShippingLineResponse, UserResponse,
};

//! Dashboard service

use tracing::instrument;

use crate::dto::DashboardStats;

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct DashboardService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DashboardService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record counts for the admin landing page
    #[instrument(skip(self))]
    pub async fn stats(&self) -> ServiceResult<DashboardStats> {
        let (total_users, total_ports, total_shipping_lines, total_rates) = futures::try_join!(
            self.ctx.user_repo().count(),
            self.ctx.port_repo().count(),
            self.ctx.shipping_line_repo().count(),
            self.ctx.rate_repo().count(),
        )?;

        Ok(DashboardStats {
            total_users,
            total_ports,
            total_shipping_lines,
            total_rates,
        })
    }
}

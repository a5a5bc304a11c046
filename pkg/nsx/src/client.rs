use async_trait::async_trait;
use pkg_constants::api::{
    IP_POOLS_PATH, LB_SERVICES_PATH, LB_VIRTUAL_SERVERS_PATH, LOGICAL_PORTS_PATH,
    LOGICAL_ROUTERS_PATH, RELEASE_ACTION, TRACEFLOWS_PATH,
};
use pkg_types::list::ListResult;
use pkg_types::loadbalancer::{LbService, LbVirtualServer};
use pkg_types::logical_port::LogicalPort;
use pkg_types::nat::NatRule;
use pkg_types::pool::PoolAllocation;
use pkg_types::traceflow::{Observation, TraceJob, TraceflowRequest};
use reqwest::Method;
use reqwest::header::ACCEPT;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Connection;
use crate::error::ApiError;

/// Manager calls needed to run a traceflow.
#[async_trait]
pub trait TraceflowApi: Send + Sync {
    /// Every logical port known to the manager, unpaginated.
    async fn list_logical_ports(&self) -> Result<Vec<LogicalPort>, ApiError>;

    /// Submit a traceflow and return the created job.
    async fn create_traceflow(&self, request: &TraceflowRequest) -> Result<TraceJob, ApiError>;

    /// Fetch a fresh snapshot of a job.
    async fn get_traceflow(&self, id: &str) -> Result<TraceJob, ApiError>;

    /// Observations recorded by a finished job, in manager order.
    async fn list_observations(&self, id: &str) -> Result<Vec<Observation>, ApiError>;
}

/// Manager calls needed to reconcile an IP pool against its consumers.
#[async_trait]
pub trait ReclaimApi: Send + Sync {
    async fn list_pool_allocations(&self, pool_id: &str) -> Result<Vec<PoolAllocation>, ApiError>;

    /// Return an allocation to its pool.
    async fn release_allocation(
        &self,
        pool_id: &str,
        allocation: &PoolAllocation,
    ) -> Result<(), ApiError>;

    async fn list_lb_services(&self) -> Result<Vec<LbService>, ApiError>;

    async fn list_lb_virtual_servers(&self) -> Result<Vec<LbVirtualServer>, ApiError>;

    async fn list_nat_rules(&self, router_id: &str) -> Result<Vec<NatRule>, ApiError>;
}

/// REST client for the NSX manager. Every request carries HTTP basic auth.
///
/// Certificate verification is disabled: managers are routinely deployed
/// with self-signed certificates.
#[derive(Clone)]
pub struct NsxClient {
    http: reqwest::Client,
    base_url: String,
    user: String,
    password: String,
}

impl NsxClient {
    pub fn new(conn: &Connection) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url: conn.base_url(),
            user: conn.user.clone(),
            password: conn.password.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let (url, body) = self.send::<()>(Method::GET, path, None).await?;
        decode(&url, &body)
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<T, ApiError> {
        let (url, body) = self.send(Method::POST, path, Some(payload)).await?;
        decode(&url, &body)
    }

    /// Issue one request and return the URL and the body text of a 2xx reply.
    async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&B>,
    ) -> Result<(String, String), ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut req = self
            .http
            .request(method.clone(), &url)
            .basic_auth(&self.user, Some(&self.password))
            .header(ACCEPT, "application/json");
        if let Some(payload) = payload {
            req = req.json(payload);
        }

        let resp = req.send().await.map_err(|source| ApiError::Transport {
            method: method.to_string(),
            url: url.clone(),
            source,
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|source| ApiError::Transport {
            method: method.to_string(),
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            return Err(ApiError::Status {
                method: method.to_string(),
                url,
                status: status.as_u16(),
                body,
            });
        }
        Ok((url, body))
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

#[async_trait]
impl TraceflowApi for NsxClient {
    async fn list_logical_ports(&self) -> Result<Vec<LogicalPort>, ApiError> {
        let list: ListResult<LogicalPort> = self.get(LOGICAL_PORTS_PATH).await?;
        Ok(list.into_results())
    }

    async fn create_traceflow(&self, request: &TraceflowRequest) -> Result<TraceJob, ApiError> {
        self.post(TRACEFLOWS_PATH, request).await
    }

    async fn get_traceflow(&self, id: &str) -> Result<TraceJob, ApiError> {
        self.get(&format!("{}/{}", TRACEFLOWS_PATH, id)).await
    }

    async fn list_observations(&self, id: &str) -> Result<Vec<Observation>, ApiError> {
        let list: ListResult<Observation> = self
            .get(&format!("{}/{}/observations", TRACEFLOWS_PATH, id))
            .await?;
        Ok(list.into_results())
    }
}

#[async_trait]
impl ReclaimApi for NsxClient {
    async fn list_pool_allocations(&self, pool_id: &str) -> Result<Vec<PoolAllocation>, ApiError> {
        let list: ListResult<PoolAllocation> = self
            .get(&format!("{}/{}/allocations", IP_POOLS_PATH, pool_id))
            .await?;
        Ok(list.into_results())
    }

    async fn release_allocation(
        &self,
        pool_id: &str,
        allocation: &PoolAllocation,
    ) -> Result<(), ApiError> {
        let path = format!("{}/{}?action={}", IP_POOLS_PATH, pool_id, RELEASE_ACTION);
        self.send(Method::POST, &path, Some(allocation)).await?;
        Ok(())
    }

    async fn list_lb_services(&self) -> Result<Vec<LbService>, ApiError> {
        let list: ListResult<LbService> = self.get(LB_SERVICES_PATH).await?;
        Ok(list.into_results())
    }

    async fn list_lb_virtual_servers(&self) -> Result<Vec<LbVirtualServer>, ApiError> {
        let list: ListResult<LbVirtualServer> = self.get(LB_VIRTUAL_SERVERS_PATH).await?;
        Ok(list.into_results())
    }

    async fn list_nat_rules(&self, router_id: &str) -> Result<Vec<NatRule>, ApiError> {
        let list: ListResult<NatRule> = self
            .get(&format!("{}/{}/nat/rules", LOGICAL_ROUTERS_PATH, router_id))
            .await?;
        Ok(list.into_results())
    }
}

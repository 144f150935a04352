use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_ecs::Client as EcsClient;
use tracing::debug;

use crate::arn::{self, ResourceKind};
use crate::error::Error;

/// Read-only ECS queries the navigator needs, one per stage.
///
/// Cluster and service names come back shortened; task identifiers are full
/// ARNs because that is what the session launcher is handed.
pub trait Inventory {
    async fn list_clusters(&self, region: &str) -> Result<Vec<String>, Error>;

    async fn list_services(&self, region: &str, cluster: &str) -> Result<Vec<String>, Error>;

    async fn list_tasks(
        &self,
        region: &str,
        cluster: &str,
        service: &str,
    ) -> Result<Vec<String>, Error>;

    async fn list_containers(
        &self,
        region: &str,
        cluster: &str,
        task: &str,
    ) -> Result<Vec<String>, Error>;

    async fn is_execute_command_enabled(
        &self,
        region: &str,
        cluster: &str,
        service: &str,
    ) -> Result<bool, Error>;
}

/// [`Inventory`] backed by the ECS API.
pub struct EcsInventory {
    config: SdkConfig,
}

impl EcsInventory {
    /// Loads the shared AWS configuration. Nothing is sent to AWS here, so bad
    /// credentials only show up on the first query.
    pub async fn load(profile: Option<&str>) -> Self {
        let mut config_loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(profile) = profile {
            config_loader = config_loader.profile_name(profile);
        }

        Self {
            config: config_loader.load().await,
        }
    }

    fn client(&self, region: &str) -> EcsClient {
        let config = aws_sdk_ecs::config::Builder::from(&self.config)
            .region(Region::new(region.to_string()))
            .build();
        EcsClient::from_conf(config)
    }
}

impl Inventory for EcsInventory {
    async fn list_clusters(&self, region: &str) -> Result<Vec<String>, Error> {
        debug!("Listing clusters in {}", region);

        let mut pages = self.client(region).list_clusters().into_paginator().send();
        let mut names = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| Error::query("list clusters", e))?;
            names.extend(
                page.cluster_arns()
                    .iter()
                    .map(|arn| arn::display_name(arn, ResourceKind::Cluster)),
            );
        }

        Ok(names)
    }

    async fn list_services(&self, region: &str, cluster: &str) -> Result<Vec<String>, Error> {
        debug!("Listing services in cluster {}", cluster);

        let mut pages = self
            .client(region)
            .list_services()
            .cluster(cluster)
            .into_paginator()
            .send();
        let mut names = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| Error::query("list services", e))?;
            names.extend(
                page.service_arns()
                    .iter()
                    .map(|arn| arn::display_name(arn, ResourceKind::Service)),
            );
        }

        Ok(names)
    }

    async fn list_tasks(
        &self,
        region: &str,
        cluster: &str,
        service: &str,
    ) -> Result<Vec<String>, Error> {
        debug!("Listing tasks for service {} in cluster {}", service, cluster);

        let mut pages = self
            .client(region)
            .list_tasks()
            .cluster(cluster)
            .service_name(service)
            .into_paginator()
            .send();
        let mut task_arns = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| Error::query("list tasks", e))?;
            task_arns.extend(page.task_arns().iter().cloned());
        }

        Ok(task_arns)
    }

    async fn list_containers(
        &self,
        region: &str,
        cluster: &str,
        task: &str,
    ) -> Result<Vec<String>, Error> {
        debug!("Describing containers of task {}", task);

        let response = self
            .client(region)
            .describe_tasks()
            .cluster(cluster)
            .tasks(task)
            .send()
            .await
            .map_err(|e| Error::query("list containers", e))?;

        let names = response
            .tasks()
            .first()
            .map(|task| {
                task.containers()
                    .iter()
                    .filter_map(|container| container.name())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(names)
    }

    async fn is_execute_command_enabled(
        &self,
        region: &str,
        cluster: &str,
        service: &str,
    ) -> Result<bool, Error> {
        debug!("Checking execute-command for service {}", service);

        let response = self
            .client(region)
            .describe_services()
            .cluster(cluster)
            .services(service)
            .send()
            .await
            .map_err(|e| Error::query("describe services", e))?;

        match response.services().first() {
            Some(found) => Ok(found.enable_execute_command()),
            None => Err(Error::Query {
                operation: "describe services",
                message: format!("service {} not found in cluster {}", service, cluster),
            }),
        }
    }
}

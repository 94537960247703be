use crate::Tagpull;
use tagpull_core::{LabelSource, PointId, PointInfo, ServiceId, ServiceInfo, TagpullError};

impl Tagpull {
    /// True if the historian recognizes `point` in any connected service.
    pub async fn exists(&self, point: &PointId) -> bool {
        self.historian.exists(point).await
    }

    /// Human-readable description of `point`.
    ///
    /// Asks the historian directly first. When it has none, the point listing
    /// of the point's `site.service` is searched. Blank descriptions count
    /// as missing and listing failures are treated as "no description".
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tagpull::describe", skip(self), fields(point = %point)),
    )]
    pub async fn describe(&self, point: &PointId) -> Option<String> {
        if let Some(d) = self.historian.describe(point).await
            && !d.trim().is_empty()
        {
            return Some(d);
        }
        let service = point.site_service()?;
        let listed = match self.historian.list_points(&service).await {
            Ok(listed) => listed,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(service = %service, error = %_e, "point listing failed");
                return None;
            }
        };
        listed
            .into_iter()
            .find(|p| p.point == *point)
            .map(|p| p.description)
            .filter(|d| !d.trim().is_empty())
    }

    /// Column label `point` would get from `source` without an explicit label.
    pub async fn label_for(&self, point: &PointId, source: LabelSource) -> String {
        self.resolve_label(point, None, source).await
    }

    /// Services known to the historian.
    ///
    /// # Errors
    /// Propagates the historian's listing error.
    pub async fn services(&self) -> Result<Vec<ServiceInfo>, TagpullError> {
        self.historian.list_services().await
    }

    /// Points exposed by one `site.service`.
    ///
    /// # Errors
    /// Propagates the historian's listing error.
    pub async fn points(&self, service: &ServiceId) -> Result<Vec<PointInfo>, TagpullError> {
        self.historian.list_points(service).await
    }
}

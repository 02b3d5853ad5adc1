//! Application state for shared services

use std::sync::Arc;

use crate::domain::DomainError;
use crate::domain::client::{Client, ClientRepository};
use crate::domain::equipment::{Equipment, EquipmentRepository};
use crate::domain::job_profile::{JobProfile, JobProfileRepository};
use crate::domain::minutes::{MeetingMinutes, MinutesRepository};
use crate::domain::objective::{Objective, ObjectiveRepository};
use crate::domain::supplier::{Supplier, SupplierRepository};
use crate::domain::training_plan::{TrainingPlan, TrainingPlanRepository};
use crate::domain::user::{User, UserRepository};
use crate::infrastructure::auth::{JwtGenerator, PasswordHasher};
use crate::infrastructure::client::ClientService;
use crate::infrastructure::equipment::EquipmentService;
use crate::infrastructure::job_profile::JobProfileService;
use crate::infrastructure::minutes::MinutesService;
use crate::infrastructure::objective::ObjectiveService;
use crate::infrastructure::observability::PrometheusMetrics;
use crate::infrastructure::storage::{StorageBackend, StorageFactory, StorageRepository};
use crate::infrastructure::supplier::SupplierService;
use crate::infrastructure::training_plan::TrainingPlanService;
use crate::infrastructure::user::UserService;

pub type DynClientService = ClientService<dyn ClientRepository>;
pub type DynUserService = UserService<dyn UserRepository, dyn PasswordHasher>;
pub type DynEquipmentService = EquipmentService<dyn EquipmentRepository>;
pub type DynJobProfileService = JobProfileService<dyn JobProfileRepository, dyn UserRepository>;
pub type DynMinutesService = MinutesService<dyn MinutesRepository>;
pub type DynObjectiveService = ObjectiveService<dyn ObjectiveRepository>;
pub type DynSupplierService = SupplierService<dyn SupplierRepository>;
pub type DynTrainingPlanService =
    TrainingPlanService<dyn TrainingPlanRepository, dyn UserRepository>;

/// Application state shared by every handler
///
/// Services are built once at start-up and injected here; handlers never
/// construct their own collaborators.
#[derive(Clone)]
pub struct AppState {
    pub client_service: Arc<DynClientService>,
    pub user_service: Arc<DynUserService>,
    pub equipment_service: Arc<DynEquipmentService>,
    pub job_profile_service: Arc<DynJobProfileService>,
    pub minutes_service: Arc<DynMinutesService>,
    pub objective_service: Arc<DynObjectiveService>,
    pub supplier_service: Arc<DynSupplierService>,
    pub training_plan_service: Arc<DynTrainingPlanService>,
    pub jwt_service: Arc<dyn JwtGenerator>,
    pub storage: StorageBackend,
    pub metrics: Option<PrometheusMetrics>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("storage", &self.storage.storage_type())
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire every repository and service over one opened storage backend
    pub async fn build(
        storage: StorageBackend,
        jwt_service: Arc<dyn JwtGenerator>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Result<Self, DomainError> {
        let clients: Arc<dyn ClientRepository> = Arc::new(StorageRepository::<Client>::new(
            StorageFactory::create(&storage).await?,
        ));
        let users: Arc<dyn UserRepository> = Arc::new(StorageRepository::<User>::new(
            StorageFactory::create(&storage).await?,
        ));
        let equipment: Arc<dyn EquipmentRepository> = Arc::new(
            StorageRepository::<Equipment>::new(StorageFactory::create(&storage).await?),
        );
        let job_profiles: Arc<dyn JobProfileRepository> = Arc::new(
            StorageRepository::<JobProfile>::new(StorageFactory::create(&storage).await?),
        );
        let minutes: Arc<dyn MinutesRepository> = Arc::new(
            StorageRepository::<MeetingMinutes>::new(StorageFactory::create(&storage).await?),
        );
        let objectives: Arc<dyn ObjectiveRepository> = Arc::new(
            StorageRepository::<Objective>::new(StorageFactory::create(&storage).await?),
        );
        let suppliers: Arc<dyn SupplierRepository> = Arc::new(
            StorageRepository::<Supplier>::new(StorageFactory::create(&storage).await?),
        );
        let training_plans: Arc<dyn TrainingPlanRepository> = Arc::new(
            StorageRepository::<TrainingPlan>::new(StorageFactory::create(&storage).await?),
        );

        Ok(Self {
            client_service: Arc::new(ClientService::new(clients)),
            user_service: Arc::new(UserService::new(Arc::clone(&users), hasher)),
            equipment_service: Arc::new(EquipmentService::new(equipment)),
            job_profile_service: Arc::new(JobProfileService::new(
                job_profiles,
                Arc::clone(&users),
            )),
            minutes_service: Arc::new(MinutesService::new(minutes)),
            objective_service: Arc::new(ObjectiveService::new(objectives)),
            supplier_service: Arc::new(SupplierService::new(suppliers)),
            training_plan_service: Arc::new(TrainingPlanService::new(training_plans, users)),
            jwt_service,
            storage,
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, metrics: Option<PrometheusMetrics>) -> Self {
        self.metrics = metrics;
        self
    }
}

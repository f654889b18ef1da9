//! # Service Registry - 싱글톤 의존성 주입 시스템
//!
//! 백엔드 서비스를 위한 싱글톤 기반 의존성 주입 컨테이너입니다.
//! Spring Framework의 ApplicationContext와 BeanFactory 역할을 Rust에서 구현한 것으로,
//! `singleton_macro`의 `#[service]`, `#[repository]` 속성이 생성한 등록 정보를
//! 이름으로 찾아 타입당 정확히 하나의 인스턴스를 관리합니다.
//!
//! ## Spring Framework와의 비교
//!
//! | Spring 개념 | 이 시스템 | 비고 |
//! |-------------|-----------|------|
//! | `ApplicationContext` | `ServiceLocator` | 전역 DI 컨테이너 |
//! | `@Service` | `#[service(name = "...")]` | 비즈니스 로직 컴포넌트 |
//! | `@Repository` | `#[repository(name = "...", collection = "...")]` | 데이터 액세스 컴포넌트 |
//! | `@Bean` | `ServiceLocator::set()` | 인프라 컴포넌트 직접 등록 |
//! | `@Lazy` | 기본 동작 | 첫 사용 시 생성 |
//! | `CircularDependencyException` | `AppError::InternalError` | 스레드별 순환 참조 감지 |
//!
//! ## 동작 원리
//!
//! ```text
//! 1. 컴파일 타임 (Component Scanning)
//!    ├─ #[service]/#[repository] → Registration 생성 ("product_service" 등)
//!    └─ inventory::collect! → 전역 레지스트리에 수집
//!
//! 2. 런타임 초기화 (Infrastructure Beans)
//!    ├─ Database, RedisClient, ProductIndex 직접 등록
//!    └─ ServiceLocator::set()
//!
//! 3. 의존성 주입 (Autowiring)
//!    ├─ 매크로가 생성한 new()에서 Arc<T> 필드마다 ServiceLocator::get::<T>() 호출
//!    ├─ 타입 이름 → 등록 이름 매칭 (GroupBoardService ↔ "group_board_service")
//!    └─ 생성자 호출 후 TypeId로 캐싱
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! #[service(name = "category")]
//! pub struct CategoryService {
//!     category_repo: Arc<CategoryRepository>,
//! }
//!
//! // 어디서든
//! let service = CategoryService::instance();
//! ```

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use crate::errors::errors::AppError;
use crate::utils::display_terminal::{print_boxed_title, print_cache_initialized, print_final_summary, print_step_complete, print_step_start, print_sub_task};

/// 비즈니스 로직 서비스를 위한 공통 인터페이스
///
/// `#[service]` 매크로가 자동으로 구현합니다.
#[async_trait]
pub trait Service: Send + Sync {
    /// 레지스트리에 등록된 이름 (`_service` 접미사 포함)
    fn name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 리포지토리를 위한 공통 인터페이스
///
/// `#[repository]` 매크로가 자동으로 구현합니다. 인덱스 생성처럼 실패할 수 있는
/// 시작 작업은 각 리포지토리의 `create_indexes`가 담당합니다.
#[async_trait]
pub trait Repository: Send + Sync {
    /// 레지스트리에 등록된 이름 (`_repository` 접미사 포함). 캐시 키 접두사로도 쓰입니다.
    fn name(&self) -> &str;

    /// 주 MongoDB 컬렉션의 이름을 반환합니다.
    fn collection_name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 서비스 등록 정보
///
/// `#[service]` 매크로에 의해 생성되며 `inventory`를 통해 컴파일 타임에 수집됩니다.
pub struct ServiceRegistration {
    /// 서비스의 고유 이름 (예: `"product_service"`)
    pub name: &'static str,
    /// `Box<Arc<T>>`를 돌려주는 생성 함수
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// 리포지토리 등록 정보
///
/// ServiceRegistration과 동일한 구조를 가지지만 초기화 순서를 위해 별도 타입으로 관리됩니다.
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

type Constructor = fn() -> Box<dyn Any + Send + Sync>;

/// 정규화된 이름 → (등록 이름, 생성자) 캐시
static SERVICE_NAME_CACHE: Lazy<HashMap<String, (&'static str, Constructor)>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|registration| (normalize_name(registration.name), (registration.name, registration.constructor)))
        .collect();
    print_cache_initialized("Service", cache.len());
    cache
});

static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, (&'static str, Constructor)>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|registration| (normalize_name(registration.name), (registration.name, registration.constructor)))
        .collect();
    print_cache_initialized("Repository", cache.len());
    cache
});

/// 등록 이름과 타입 이름을 같은 키로 맞춥니다.
///
/// `"group_board_service"`와 `GroupBoardService`는 모두 `"groupboard"`가 됩니다.
fn normalize_name(name: &str) -> String {
    let flat: String = name
        .chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect();

    flat.strip_suffix("repository")
        .or_else(|| flat.strip_suffix("service"))
        .map(str::to_string)
        .unwrap_or(flat)
}

thread_local! {
    /// 현재 스레드에서 생성 중인 타입들 (순환 참조 감지용)
    static RESOLVING: RefCell<HashSet<TypeId>> = RefCell::new(HashSet::new());
}

/// 생성 중 표시를 스코프 종료 시 해제하는 가드
struct ResolvingGuard(TypeId);

impl Drop for ResolvingGuard {
    fn drop(&mut self) {
        RESOLVING.with(|set| {
            set.borrow_mut().remove(&self.0);
        });
    }
}

/// 싱글톤 의존성 주입 컨테이너
///
/// - **싱글톤 보장**: 각 타입당 하나의 인스턴스만 캐시
/// - **지연 초기화**: 첫 요청 시점에 생성
/// - **락 비보유 생성**: 생성자 실행 중에는 락을 잡지 않으므로 생성자 안에서
///   다른 컴포넌트를 자유롭게 조회할 수 있습니다
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// 지정된 타입의 싱글톤 인스턴스를 가져옵니다.
    ///
    /// 매크로가 생성한 생성자가 이 함수를 사용하므로, 등록되지 않은 타입이거나
    /// 순환 참조가 감지되면 패닉합니다. 복구 가능한 조회가 필요하면
    /// [`ServiceLocator::try_get`]을 사용하세요.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        match Self::try_get::<T>() {
            Ok(instance) => instance,
            Err(e) => {
                log::error!("❌ {}", e);
                panic!("{}", e);
            }
        }
    }

    /// 지정된 타입의 싱글톤 인스턴스를 가져오거나 에러를 반환합니다.
    pub fn try_get<T: 'static + Send + Sync>() -> Result<Arc<T>, AppError> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = LOCATOR.cached(type_id) {
            return instance
                .downcast::<T>()
                .map_err(|_| AppError::InternalError(format!("Type mismatch in ServiceLocator: {}", type_name)));
        }

        let clean_type_name = Self::extract_clean_type_name(type_name);
        let (registration_name, constructor) = Self::find_registration(clean_type_name).ok_or_else(|| {
            AppError::InternalError(format!(
                "Component not found: {}. Register it with #[service]/#[repository] or ServiceLocator::set()",
                clean_type_name
            ))
        })?;

        let newly_marked = RESOLVING.with(|set| set.borrow_mut().insert(type_id));
        if !newly_marked {
            return Err(AppError::InternalError(format!(
                "Circular dependency detected: {} is already being initialized",
                type_name
            )));
        }
        let _guard = ResolvingGuard(type_id);

        let created = constructor()
            .downcast::<Arc<T>>()
            .map_err(|_| AppError::InternalError(format!("Type mismatch for component: {}", registration_name)))?;

        // 다른 스레드가 먼저 생성했다면 먼저 등록된 인스턴스를 유지
        let mut instances = LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner());
        let instance = instances
            .entry(type_id)
            .or_insert_with(|| (*created).clone() as Arc<dyn Any + Send + Sync>)
            .clone();

        instance
            .downcast::<T>()
            .map_err(|_| AppError::InternalError(format!("Type mismatch in ServiceLocator: {}", type_name)))
    }

    /// 타입 이름 접미사로 조회할 레지스트리를 고릅니다.
    fn find_registration(clean_type_name: &str) -> Option<(&'static str, Constructor)> {
        let key = normalize_name(clean_type_name);
        if clean_type_name.ends_with("Repository") {
            REPOSITORY_NAME_CACHE.get(&key).copied()
        } else {
            SERVICE_NAME_CACHE.get(&key).copied()
        }
    }

    fn cached(&self, type_id: TypeId) -> Option<Arc<dyn Any + Send + Sync>> {
        self.instances
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&type_id)
            .cloned()
    }

    /// `auth::services::UserService` 형태의 경로에서 `UserService`만 추출합니다.
    fn extract_clean_type_name(type_name: &str) -> &str {
        type_name.rsplit("::").next().unwrap_or(type_name)
    }

    /// 외부에서 생성된 인스턴스를 직접 등록합니다.
    ///
    /// Spring의 `registerSingleton()`과 같은 역할로, 매크로로 관리되지 않는
    /// 인프라 컴포넌트(Database, RedisClient, 검색 인덱스)를 등록할 때 사용합니다.
    /// 같은 타입이 이미 있으면 교체합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let clean_name = Self::extract_clean_type_name(std::any::type_name::<T>());
        log::info!("📦 Registering: {}", clean_name);

        let mut instances = LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner());
        instances.insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 1. **Repository 먼저**: 데이터 계층이 비즈니스 계층보다 먼저 생성
    /// 2. **Service 나중에**: 리포지토리 의존성이 해결된 후 생성
    pub async fn initialize_all() -> Result<(), AppError> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        let repo_registrations: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        let repo_count = repo_registrations.len();

        if repo_count > 0 {
            print_step_start(1, "Creating Repository instances");
            for registration in repo_registrations {
                print_sub_task(registration.name, "Creating...");
                let _instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }
            print_step_complete(1, "Repository instances created", repo_count);
        }

        let service_registrations: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        let service_count = service_registrations.len();

        if service_count > 0 {
            print_step_start(2, "Creating Service instances");
            for registration in service_registrations {
                print_sub_task(registration.name, "Creating...");
                let _instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }
            print_step_complete(2, "Service instances created", service_count);
        }

        print_final_summary(repo_count, service_count);

        Ok(())
    }
}

/// 전역 서비스 로케이터 인스턴스
static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

#[cfg(test)]
mod tests {
    use super::*;
    use singleton_macro::service;

    struct Clock {
        now: i64,
    }

    #[service(name = "greeter")]
    struct Greeter {
        clock: Arc<Clock>,
    }

    #[service(name = "self_referencing")]
    struct SelfReferencing {
        me: Arc<SelfReferencing>,
    }

    struct Unregistered;

    struct Thermometer {
        celsius: i32,
    }

    #[test]
    fn test_set_and_get_infrastructure_component() {
        ServiceLocator::set(Arc::new(Thermometer { celsius: 21 }));
        let thermometer = ServiceLocator::get::<Thermometer>();
        assert_eq!(thermometer.celsius, 21);
    }

    #[test]
    fn test_registered_service_is_singleton() {
        ServiceLocator::set(Arc::new(Clock { now: 7 }));

        let first = ServiceLocator::get::<Greeter>();
        let second = Greeter::instance();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.clock.now, 7);
        assert_eq!(Service::name(first.as_ref()), "greeter_service");
    }

    #[test]
    fn test_unregistered_type_is_an_error() {
        let result = ServiceLocator::try_get::<Unregistered>();
        assert!(matches!(result, Err(AppError::InternalError(msg)) if msg.contains("Unregistered")));
    }

    #[test]
    fn test_circular_dependency_panics() {
        let result = std::panic::catch_unwind(|| ServiceLocator::try_get::<SelfReferencing>().map(|s| s.me.clone()));
        assert!(result.is_err());
        // 가드가 표시를 해제했으므로 다음 시도도 같은 방식으로 실패해야 함
        let again = std::panic::catch_unwind(|| ServiceLocator::try_get::<SelfReferencing>().map(|_| ()));
        assert!(again.is_err());
    }

    #[test]
    fn test_normalize_name_matches_type_and_registration() {
        assert_eq!(normalize_name("group_board_service"), "groupboard");
        assert_eq!(normalize_name("GroupBoardService"), "groupboard");
        assert_eq!(normalize_name("product_repository"), "product");
        assert_eq!(normalize_name("ProductRepository"), "product");
        assert_eq!(normalize_name("Greeter"), "greeter");
    }

    #[test]
    fn test_clean_type_name() {
        assert_eq!(ServiceLocator::extract_clean_type_name("a::b::UserService"), "UserService");
        assert_eq!(ServiceLocator::extract_clean_type_name("Plain"), "Plain");
    }
}

use chrono::NaiveDate;
use tracing::{info, instrument};
use unidad_core::dates::{age_in_years, today};
use unidad_core::{Page, PaginationParams, ServiceError, ServiceResult};
use unidad_db::Store;
use unidad_models::matriculas::Matricula;
use unidad_models::representantes::Representante;
use unidad_models::{Entity, EstudianteId, RepresentanteId};
use unidad_observability::{track_entity_created, track_entity_deleted};

use crate::modules::estudiantes::model::{
    CEDULA_MAX_LEN, CreateEstudianteDto, EDAD_MINIMA, Estudiante, EstudiantePatch, NewEstudiante,
    UpdateEstudianteDto,
};
use crate::utils::listing::paginate;
use crate::utils::references::ensure_exists;
use crate::utils::text::{optional, required, required_if_present};

const NOMBRE_VACIO: &str = "El nombre no puede estar vacío";
const APELLIDO_VACIO: &str = "El apellido no puede estar vacío";

fn no_encontrado(id: EstudianteId) -> ServiceError {
    ServiceError::not_found(format!("Estudiante con ID {id} no encontrado"))
}

fn cedula_duplicada(cedula: &str) -> ServiceError {
    ServiceError::duplicate(format!("Ya existe un estudiante con cédula {cedula}"))
}

fn validar_cedula(cedula: &str) -> ServiceResult<()> {
    if cedula.is_empty() || cedula.chars().count() > CEDULA_MAX_LEN {
        return Err(ServiceError::validation(format!(
            "Cédula inválida (máx {CEDULA_MAX_LEN} caracteres)"
        )));
    }
    Ok(())
}

fn validar_edad(fecha_nacimiento: NaiveDate, hoy: NaiveDate) -> ServiceResult<()> {
    if age_in_years(fecha_nacimiento, hoy) < EDAD_MINIMA {
        return Err(ServiceError::validation(format!(
            "El estudiante debe tener al menos {EDAD_MINIMA} años de edad"
        )));
    }
    Ok(())
}

pub struct EstudianteService<'a> {
    store: &'a dyn Store,
}

impl<'a> EstudianteService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Checks run in a fixed order: duplicate cédula, cédula format,
    /// guardian existence, minimum age.
    #[instrument(skip(self))]
    pub async fn crear(&self, dto: CreateEstudianteDto) -> ServiceResult<Estudiante> {
        let repo = self.store.estudiantes();
        let cedula = dto.cedula.trim().to_string();

        if repo.get_by_cedula(&cedula).await?.is_some() {
            return Err(cedula_duplicada(&cedula));
        }
        validar_cedula(&cedula)?;
        if let Some(representante_id) = dto.representante_id {
            ensure_exists::<Representante, _>(self.store.representantes(), representante_id).await?;
        }
        validar_edad(dto.fecha_nacimiento, today())?;

        let nuevo = NewEstudiante {
            nombre: required(&dto.nombre, NOMBRE_VACIO)?,
            apellido: required(&dto.apellido, APELLIDO_VACIO)?,
            cedula,
            fecha_nacimiento: dto.fecha_nacimiento,
            correo: optional(dto.correo),
            representante_id: dto.representante_id,
        };
        let cedula = nuevo.cedula.clone();

        let estudiante = repo
            .create(nuevo)
            .await
            .map_err(|e| ServiceError::from(e).or_duplicate(|| cedula_duplicada(&cedula).to_string()))?;

        info!(id = %estudiante.id, "Estudiante creado");
        track_entity_created(Estudiante::NAME);
        Ok(estudiante)
    }

    #[instrument(skip(self))]
    pub async fn obtener(&self, id: EstudianteId) -> ServiceResult<Estudiante> {
        self.store
            .estudiantes()
            .read(id)
            .await?
            .ok_or_else(|| no_encontrado(id))
    }

    #[instrument(skip(self))]
    pub async fn obtener_por_cedula(&self, cedula: &str) -> ServiceResult<Estudiante> {
        let cedula = cedula.trim();
        self.store
            .estudiantes()
            .get_by_cedula(cedula)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found(format!("Estudiante con cédula {cedula} no encontrado"))
            })
    }

    #[instrument(skip(self))]
    pub async fn obtener_por_correo(&self, correo: &str) -> ServiceResult<Estudiante> {
        let correo = correo.trim();
        self.store
            .estudiantes()
            .get_by_correo(correo)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found(format!("Estudiante con correo {correo} no encontrado"))
            })
    }

    #[instrument(skip(self))]
    pub async fn listar(&self, params: &PaginationParams) -> ServiceResult<Page<Estudiante>> {
        paginate(self.store.estudiantes(), params).await
    }

    #[instrument(skip(self))]
    pub async fn listar_por_representante(
        &self,
        representante_id: RepresentanteId,
    ) -> ServiceResult<Vec<Estudiante>> {
        Ok(self
            .store
            .estudiantes()
            .get_by_representante(representante_id)
            .await?)
    }

    /// Enrollments of an existing student.
    #[instrument(skip(self))]
    pub async fn listar_matriculas(&self, id: EstudianteId) -> ServiceResult<Vec<Matricula>> {
        self.obtener(id).await?;
        Ok(self.store.matriculas().get_by_estudiante(id).await?)
    }

    /// Only the supplied fields are validated and written.
    #[instrument(skip(self))]
    pub async fn actualizar(
        &self,
        id: EstudianteId,
        dto: UpdateEstudianteDto,
    ) -> ServiceResult<Estudiante> {
        let repo = self.store.estudiantes();
        self.obtener(id).await?;

        let cedula = dto.cedula.map(|c| c.trim().to_string());
        if let Some(cedula) = &cedula {
            if let Some(existente) = repo.get_by_cedula(cedula).await?
                && existente.id != id
            {
                return Err(cedula_duplicada(cedula));
            }
            validar_cedula(cedula)?;
        }
        if let Some(representante_id) = dto.representante_id {
            ensure_exists::<Representante, _>(self.store.representantes(), representante_id).await?;
        }
        if let Some(fecha_nacimiento) = dto.fecha_nacimiento {
            validar_edad(fecha_nacimiento, today())?;
        }

        let patch = EstudiantePatch {
            nombre: required_if_present(dto.nombre, NOMBRE_VACIO)?,
            apellido: required_if_present(dto.apellido, APELLIDO_VACIO)?,
            cedula: cedula.clone(),
            fecha_nacimiento: dto.fecha_nacimiento,
            correo: optional(dto.correo),
            representante_id: dto.representante_id,
        };

        repo.update(id, patch)
            .await
            .map_err(|e| {
                ServiceError::from(e).or_duplicate(|| {
                    cedula_duplicada(cedula.as_deref().unwrap_or_default()).to_string()
                })
            })?
            .ok_or_else(|| no_encontrado(id))
    }

    #[instrument(skip(self))]
    pub async fn eliminar(&self, id: EstudianteId) -> ServiceResult<()> {
        if !self.store.estudiantes().delete(id).await? {
            return Err(no_encontrado(id));
        }
        info!(%id, "Estudiante eliminado");
        track_entity_deleted(Estudiante::NAME);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Months;
    use unidad_db::MemoryStore;
    use unidad_models::representantes::CreateRepresentanteDto;

    use crate::modules::representantes::service::RepresentanteService;

    fn years_ago(years: u32) -> NaiveDate {
        today().checked_sub_months(Months::new(years * 12)).unwrap()
    }

    fn dto(cedula: &str) -> CreateEstudianteDto {
        CreateEstudianteDto {
            nombre: "Juan".to_string(),
            apellido: "Pérez".to_string(),
            cedula: cedula.to_string(),
            fecha_nacimiento: years_ago(10),
            correo: None,
            representante_id: None,
        }
    }

    #[test]
    fn test_validar_cedula() {
        assert!(validar_cedula("1712345678").is_ok());
        assert!(validar_cedula(&"9".repeat(20)).is_ok());
        assert!(validar_cedula(&"9".repeat(21)).is_err());
        assert!(validar_cedula("").is_err());
    }

    #[test]
    fn test_validar_edad_uses_day_division() {
        let hoy = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        // 1826 days
        assert!(validar_edad(NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(), hoy).is_ok());
        // 1825 days is still five 365-day years
        assert!(validar_edad(NaiveDate::from_ymd_opt(2015, 1, 2).unwrap(), hoy).is_ok());
        // 1824 days
        assert!(validar_edad(NaiveDate::from_ymd_opt(2015, 1, 3).unwrap(), hoy).is_err());
    }

    #[tokio::test]
    async fn test_crear_and_obtener_por_cedula() {
        let store = MemoryStore::new();
        let service = EstudianteService::new(&store);

        let est = service.crear(dto(" 1712345678 ")).await.unwrap();
        assert_eq!(est.cedula, "1712345678");
        assert_eq!(service.obtener_por_cedula("1712345678").await.unwrap(), est);
        assert!(
            service
                .obtener_por_cedula("0000000000")
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[tokio::test]
    async fn test_obtener_por_correo() {
        let store = MemoryStore::new();
        let service = EstudianteService::new(&store);
        let est = service
            .crear(CreateEstudianteDto {
                correo: Some(" juan@escuela.ec ".to_string()),
                ..dto("1712345678")
            })
            .await
            .unwrap();

        assert_eq!(est.correo.as_deref(), Some("juan@escuela.ec"));
        assert_eq!(service.obtener_por_correo("juan@escuela.ec").await.unwrap(), est);
        let err = service.obtener_por_correo("otro@escuela.ec").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Estudiante con correo otro@escuela.ec no encontrado");
    }

    #[tokio::test]
    async fn test_crear_duplicate_cedula() {
        let store = MemoryStore::new();
        let service = EstudianteService::new(&store);
        service.crear(dto("1712345678")).await.unwrap();

        let err = service.crear(dto("1712345678")).await.unwrap_err();
        assert!(err.is_duplicate());
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Ya existe un estudiante con cédula 1712345678");
    }

    #[tokio::test]
    async fn test_crear_rejects_long_cedula() {
        let store = MemoryStore::new();
        let service = EstudianteService::new(&store);

        let err = service.crear(dto(&"1".repeat(21))).await.unwrap_err();
        assert!(err.is_validation());
        assert!(!err.is_duplicate());
    }

    #[tokio::test]
    async fn test_crear_with_missing_representante() {
        let store = MemoryStore::new();
        let service = EstudianteService::new(&store);

        let mut input = dto("1712345678");
        input.representante_id = Some(RepresentanteId::new(99));
        let err = service.crear(input).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Representante con ID 99 no existe");
    }

    #[tokio::test]
    async fn test_crear_with_existing_representante() {
        let store = MemoryStore::new();
        let rep = RepresentanteService::new(&store)
            .crear(CreateRepresentanteDto {
                nombre: "María".to_string(),
                telefono: "0991234567".to_string(),
            })
            .await
            .unwrap();

        let mut input = dto("1712345678");
        input.representante_id = Some(rep.id);
        let service = EstudianteService::new(&store);
        let est = service.crear(input).await.unwrap();
        assert_eq!(est.representante_id, Some(rep.id));
        assert_eq!(service.listar_por_representante(rep.id).await.unwrap(), vec![est]);
    }

    #[tokio::test]
    async fn test_crear_minimum_age() {
        let store = MemoryStore::new();
        let service = EstudianteService::new(&store);

        let mut born_today = dto("1");
        born_today.fecha_nacimiento = today();
        assert!(service.crear(born_today).await.unwrap_err().is_validation());

        let mut six = dto("2");
        six.fecha_nacimiento = years_ago(6);
        assert!(service.crear(six).await.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_is_reported_before_format() {
        let store = MemoryStore::new();
        let service = EstudianteService::new(&store);
        service.crear(dto("1712345678")).await.unwrap();

        let mut input = dto("1712345678");
        input.fecha_nacimiento = today();
        assert!(service.crear(input).await.unwrap_err().is_duplicate());
    }

    #[tokio::test]
    async fn test_actualizar_cedula_collision() {
        let store = MemoryStore::new();
        let service = EstudianteService::new(&store);
        service.crear(dto("111")).await.unwrap();
        let other = service.crear(dto("222")).await.unwrap();

        let err = service
            .actualizar(
                other.id,
                UpdateEstudianteDto {
                    cedula: Some("111".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_duplicate());

        // Keeping its own cédula is not a collision.
        let same = service
            .actualizar(
                other.id,
                UpdateEstudianteDto {
                    cedula: Some("222".to_string()),
                    nombre: Some("Pedro".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(same.nombre, "Pedro");
    }

    #[tokio::test]
    async fn test_not_found_paths() {
        let store = MemoryStore::new();
        let service = EstudianteService::new(&store);
        let missing = EstudianteId::new(5);

        assert!(service.obtener(missing).await.unwrap_err().is_not_found());
        assert!(service.eliminar(missing).await.unwrap_err().is_not_found());
        assert!(
            service
                .actualizar(missing, UpdateEstudianteDto::default())
                .await
                .unwrap_err()
                .is_not_found()
        );
        assert!(service.listar_matriculas(missing).await.unwrap_err().is_not_found());
    }
}

use tracing::{info, instrument};
use unidad_core::dates::today;
use unidad_core::{Page, PaginationParams, ServiceError, ServiceResult};
use unidad_db::Store;
use unidad_models::asignaturas::Asignatura;
use unidad_models::matriculas::Matricula;
use unidad_models::{AsignaturaId, AsistenciaId, Entity, MatriculaId};
use unidad_observability::{track_entity_created, track_entity_deleted};

use crate::modules::asistencias::model::{
    Asistencia, AsistenciaPatch, CreateAsistenciaDto, EstadoAsistencia, NewAsistencia,
    UpdateAsistenciaDto,
};
use crate::utils::listing::paginate;
use crate::utils::references::ensure_exists;
use crate::utils::text::estado;

fn no_encontrada(id: AsistenciaId) -> ServiceError {
    ServiceError::not_found(format!("Asistencia con ID {id} no encontrada"))
}

pub struct AsistenciaService<'a> {
    store: &'a dyn Store,
}

impl<'a> AsistenciaService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Label first, then enrollment, then subject. Dated today unless given.
    #[instrument(skip(self))]
    pub async fn crear(&self, dto: CreateAsistenciaDto) -> ServiceResult<Asistencia> {
        let estado_registro: EstadoAsistencia = estado(&dto.estado)?;
        ensure_exists::<Matricula, _>(self.store.matriculas(), dto.matricula_id).await?;
        ensure_exists::<Asignatura, _>(self.store.asignaturas(), dto.asignatura_id).await?;

        let asistencia = self
            .store
            .asistencias()
            .create(NewAsistencia {
                fecha: dto.fecha.unwrap_or_else(today),
                estado: estado_registro,
                matricula_id: dto.matricula_id,
                asignatura_id: dto.asignatura_id,
            })
            .await?;

        info!(
            id = %asistencia.id,
            matricula_id = %asistencia.matricula_id,
            estado = %asistencia.estado,
            "Asistencia registrada"
        );
        track_entity_created(Asistencia::NAME);
        Ok(asistencia)
    }

    #[instrument(skip(self))]
    pub async fn obtener(&self, id: AsistenciaId) -> ServiceResult<Asistencia> {
        self.store
            .asistencias()
            .read(id)
            .await?
            .ok_or_else(|| no_encontrada(id))
    }

    #[instrument(skip(self))]
    pub async fn listar(&self, params: &PaginationParams) -> ServiceResult<Page<Asistencia>> {
        paginate(self.store.asistencias(), params).await
    }

    #[instrument(skip(self))]
    pub async fn listar_por_matricula(
        &self,
        matricula_id: MatriculaId,
    ) -> ServiceResult<Vec<Asistencia>> {
        Ok(self
            .store
            .asistencias()
            .get_by_matricula(matricula_id)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn listar_por_asignatura(
        &self,
        asignatura_id: AsignaturaId,
    ) -> ServiceResult<Vec<Asistencia>> {
        Ok(self
            .store
            .asistencias()
            .get_by_asignatura(asignatura_id)
            .await?)
    }

    /// Unknown labels are rejected the same way as on create.
    #[instrument(skip(self))]
    pub async fn listar_por_estado(&self, label: &str) -> ServiceResult<Vec<Asistencia>> {
        let estado = estado::<EstadoAsistencia>(label)?;
        Ok(self.store.asistencias().get_by_estado(estado).await?)
    }

    #[instrument(skip(self))]
    pub async fn actualizar(
        &self,
        id: AsistenciaId,
        dto: UpdateAsistenciaDto,
    ) -> ServiceResult<Asistencia> {
        self.obtener(id).await?;

        let nuevo_estado = dto
            .estado
            .as_deref()
            .map(estado::<EstadoAsistencia>)
            .transpose()?;
        if let Some(matricula_id) = dto.matricula_id {
            ensure_exists::<Matricula, _>(self.store.matriculas(), matricula_id).await?;
        }
        if let Some(asignatura_id) = dto.asignatura_id {
            ensure_exists::<Asignatura, _>(self.store.asignaturas(), asignatura_id).await?;
        }

        let patch = AsistenciaPatch {
            fecha: dto.fecha,
            estado: nuevo_estado,
            matricula_id: dto.matricula_id,
            asignatura_id: dto.asignatura_id,
        };

        self.store
            .asistencias()
            .update(id, patch)
            .await?
            .ok_or_else(|| no_encontrada(id))
    }

    #[instrument(skip(self))]
    pub async fn eliminar(&self, id: AsistenciaId) -> ServiceResult<()> {
        if !self.store.asistencias().delete(id).await? {
            return Err(no_encontrada(id));
        }
        info!(%id, "Asistencia eliminada");
        track_entity_deleted(Asistencia::NAME);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Months, NaiveDate};
    use unidad_db::MemoryStore;
    use unidad_models::asignaturas::CreateAsignaturaDto;
    use unidad_models::cursos::CreateCursoDto;
    use unidad_models::estudiantes::CreateEstudianteDto;
    use unidad_models::matriculas::CreateMatriculaDto;

    use crate::modules::asignaturas::service::AsignaturaService;
    use crate::modules::cursos::service::CursoService;
    use crate::modules::estudiantes::service::EstudianteService;
    use crate::modules::matriculas::service::MatriculaService;

    async fn fixture(store: &MemoryStore) -> (MatriculaId, AsignaturaId) {
        let est = EstudianteService::new(store)
            .crear(CreateEstudianteDto {
                nombre: "Luis".to_string(),
                apellido: "Andrade".to_string(),
                cedula: "0912345678".to_string(),
                fecha_nacimiento: today().checked_sub_months(Months::new(96)).unwrap(),
                correo: None,
                representante_id: None,
            })
            .await
            .unwrap();
        let curso = CursoService::new(store)
            .crear(CreateCursoDto {
                nombre: "3B".to_string(),
                nivel: "Básica".to_string(),
            })
            .await
            .unwrap();
        let asignatura = AsignaturaService::new(store)
            .crear(CreateAsignaturaDto {
                nombre: "Lengua".to_string(),
                descripcion: None,
                curso_id: curso.id,
                docente_id: None,
            })
            .await
            .unwrap();
        let matricula = MatriculaService::new(store)
            .crear(CreateMatriculaDto {
                fecha: None,
                estudiante_id: est.id,
                curso_id: curso.id,
                estado: Some("ACTIVO".to_string()),
            })
            .await
            .unwrap();
        (matricula.id, asignatura.id)
    }

    fn dto(estado: &str, m: MatriculaId, a: AsignaturaId) -> CreateAsistenciaDto {
        CreateAsistenciaDto {
            fecha: None,
            estado: estado.to_string(),
            matricula_id: m,
            asignatura_id: a,
        }
    }

    #[tokio::test]
    async fn test_crear_defaults_to_today() {
        let store = MemoryStore::new();
        let (m, a) = fixture(&store).await;

        let asistencia = AsistenciaService::new(&store)
            .crear(dto("PRESENTE", m, a))
            .await
            .unwrap();
        assert_eq!(asistencia.fecha, today());
        assert_eq!(asistencia.estado, EstadoAsistencia::Presente);
    }

    #[tokio::test]
    async fn test_crear_validates_label_before_references() {
        let store = MemoryStore::new();
        let service = AsistenciaService::new(&store);

        let err = service
            .crear(dto("TARDE", MatriculaId::new(1), AsignaturaId::new(1)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Estado inválido: TARDE");

        let err = service
            .crear(dto("AUSENTE", MatriculaId::new(1), AsignaturaId::new(1)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Matrícula con ID 1 no existe");
    }

    #[tokio::test]
    async fn test_crear_requires_asignatura() {
        let store = MemoryStore::new();
        let (m, _) = fixture(&store).await;

        let err = AsistenciaService::new(&store)
            .crear(dto("ATRASO", m, AsignaturaId::new(40)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Asignatura con ID 40 no existe");
    }

    #[tokio::test]
    async fn test_actualizar_estado_and_listings() {
        let store = MemoryStore::new();
        let (m, a) = fixture(&store).await;
        let service = AsistenciaService::new(&store);

        let mut input = dto("AUSENTE", m, a);
        input.fecha = NaiveDate::from_ymd_opt(2024, 10, 1);
        let asistencia = service.crear(input).await.unwrap();

        let err = service
            .actualizar(
                asistencia.id,
                UpdateAsistenciaDto {
                    estado: Some("ausente".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let justificada = service
            .actualizar(
                asistencia.id,
                UpdateAsistenciaDto {
                    estado: Some("JUSTIFICADO".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(justificada.estado, EstadoAsistencia::Justificado);
        assert_eq!(justificada.fecha, NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());

        assert_eq!(service.listar_por_matricula(m).await.unwrap(), vec![justificada.clone()]);
        assert_eq!(service.listar_por_asignatura(a).await.unwrap(), vec![justificada.clone()]);
        assert_eq!(service.listar_por_estado("JUSTIFICADO").await.unwrap(), vec![justificada]);
        assert!(service.listar_por_estado("AUSENTE").await.unwrap().is_empty());

        let err = service.listar_por_estado("justificado").await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Estado inválido: justificado");
    }

    #[tokio::test]
    async fn test_missing_asistencia() {
        let store = MemoryStore::new();
        let service = AsistenciaService::new(&store);

        assert!(service.obtener(AsistenciaId::new(1)).await.unwrap_err().is_not_found());
        assert!(service.eliminar(AsistenciaId::new(1)).await.unwrap_err().is_not_found());
    }
}

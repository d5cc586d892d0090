use tracing::{info, instrument};
use unidad_core::{Page, PaginationParams, ServiceError, ServiceResult};
use unidad_db::Store;
use unidad_models::asignaturas::Asignatura;
use unidad_models::matriculas::Matricula;
use unidad_models::{AsignaturaId, CalificacionId, Entity, MatriculaId};
use unidad_observability::{track_entity_created, track_entity_deleted};

use crate::modules::calificaciones::model::{
    Calificacion, CalificacionPatch, CreateCalificacionDto, NOTA_MAX, NOTA_MIN, NewCalificacion,
    QUIMESTRES, UpdateCalificacionDto,
};
use crate::utils::listing::paginate;
use crate::utils::references::ensure_exists;

fn no_encontrada(id: CalificacionId) -> ServiceError {
    ServiceError::not_found(format!("Calificación con ID {id} no encontrada"))
}

/// NaN fails the range check.
fn validar_nota(nota: f64) -> ServiceResult<()> {
    if !(NOTA_MIN..=NOTA_MAX).contains(&nota) {
        return Err(ServiceError::validation(format!(
            "La nota debe estar entre {NOTA_MIN} y {NOTA_MAX}"
        )));
    }
    Ok(())
}

fn validar_quimestre(quimestre: i32) -> ServiceResult<()> {
    if !QUIMESTRES.contains(&quimestre) {
        return Err(ServiceError::validation(format!(
            "El quimestre debe estar entre {} y {}",
            QUIMESTRES.start(),
            QUIMESTRES.end()
        )));
    }
    Ok(())
}

pub struct CalificacionService<'a> {
    store: &'a dyn Store,
}

impl<'a> CalificacionService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Checks nota, quimestre, enrollment and subject, in that order.
    #[instrument(skip(self))]
    pub async fn crear(&self, dto: CreateCalificacionDto) -> ServiceResult<Calificacion> {
        validar_nota(dto.nota)?;
        validar_quimestre(dto.quimestre)?;
        ensure_exists::<Matricula, _>(self.store.matriculas(), dto.matricula_id).await?;
        ensure_exists::<Asignatura, _>(self.store.asignaturas(), dto.asignatura_id).await?;

        let calificacion = self
            .store
            .calificaciones()
            .create(NewCalificacion {
                nota: dto.nota,
                quimestre: dto.quimestre,
                matricula_id: dto.matricula_id,
                asignatura_id: dto.asignatura_id,
            })
            .await?;

        info!(
            id = %calificacion.id,
            matricula_id = %calificacion.matricula_id,
            nota = calificacion.nota,
            "Calificación registrada"
        );
        track_entity_created(Calificacion::NAME);
        Ok(calificacion)
    }

    #[instrument(skip(self))]
    pub async fn obtener(&self, id: CalificacionId) -> ServiceResult<Calificacion> {
        self.store
            .calificaciones()
            .read(id)
            .await?
            .ok_or_else(|| no_encontrada(id))
    }

    #[instrument(skip(self))]
    pub async fn listar(&self, params: &PaginationParams) -> ServiceResult<Page<Calificacion>> {
        paginate(self.store.calificaciones(), params).await
    }

    #[instrument(skip(self))]
    pub async fn listar_por_matricula(
        &self,
        matricula_id: MatriculaId,
    ) -> ServiceResult<Vec<Calificacion>> {
        Ok(self
            .store
            .calificaciones()
            .get_by_matricula(matricula_id)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn listar_por_asignatura(
        &self,
        asignatura_id: AsignaturaId,
    ) -> ServiceResult<Vec<Calificacion>> {
        Ok(self
            .store
            .calificaciones()
            .get_by_asignatura(asignatura_id)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn listar_por_quimestre(&self, quimestre: i32) -> ServiceResult<Vec<Calificacion>> {
        validar_quimestre(quimestre)?;
        Ok(self
            .store
            .calificaciones()
            .get_by_quimestre(quimestre)
            .await?)
    }

    /// Mean grade of an enrollment; `0.0` when it has none.
    #[instrument(skip(self))]
    pub async fn promedio(&self, matricula_id: MatriculaId) -> ServiceResult<f64> {
        Ok(self
            .store
            .calificaciones()
            .promedio_por_matricula(matricula_id)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn actualizar(
        &self,
        id: CalificacionId,
        dto: UpdateCalificacionDto,
    ) -> ServiceResult<Calificacion> {
        self.obtener(id).await?;

        if let Some(nota) = dto.nota {
            validar_nota(nota)?;
        }
        if let Some(quimestre) = dto.quimestre {
            validar_quimestre(quimestre)?;
        }
        if let Some(matricula_id) = dto.matricula_id {
            ensure_exists::<Matricula, _>(self.store.matriculas(), matricula_id).await?;
        }
        if let Some(asignatura_id) = dto.asignatura_id {
            ensure_exists::<Asignatura, _>(self.store.asignaturas(), asignatura_id).await?;
        }

        let patch = CalificacionPatch {
            nota: dto.nota,
            quimestre: dto.quimestre,
            matricula_id: dto.matricula_id,
            asignatura_id: dto.asignatura_id,
        };

        self.store
            .calificaciones()
            .update(id, patch)
            .await?
            .ok_or_else(|| no_encontrada(id))
    }

    #[instrument(skip(self))]
    pub async fn eliminar(&self, id: CalificacionId) -> ServiceResult<()> {
        if !self.store.calificaciones().delete(id).await? {
            return Err(no_encontrada(id));
        }
        info!(%id, "Calificación eliminada");
        track_entity_deleted(Calificacion::NAME);
        Ok(())
    }
}

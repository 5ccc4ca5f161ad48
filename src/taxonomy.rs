//! The survey taxonomy: Pillar → Category → ordered question ids.
//!
//! The taxonomy is an immutable value injected into the aggregation
//! engine rather than a compile-time global, so tests can substitute a
//! smaller one. Pillar and category order is carried as data (ordered
//! `Vec`s) and is meaningful: it drives display order and index labels.

use crate::models::PillarId;
use serde::{Deserialize, Serialize};

/// A named group of survey questions within a pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTaxonomy {
    /// Display label, also the key used in the narrative request body.
    pub label: String,
    /// Question ids in display order.
    pub questions: Vec<String>,
}

/// One pillar and its ordered categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarTaxonomy {
    pub id: PillarId,
    pub categories: Vec<CategoryTaxonomy>,
}

/// The full survey structure. Constant for the process; never mutated.
///
/// Invariant: every question id appears in exactly one category of
/// exactly one pillar (checked by `duplicated_questions`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub pillars: Vec<PillarTaxonomy>,
}

fn category(label: &str, questions: &[&str]) -> CategoryTaxonomy {
    CategoryTaxonomy {
        label: label.to_string(),
        questions: questions.iter().map(|q| q.to_string()).collect(),
    }
}

impl Taxonomy {
    /// The production maturity-survey taxonomy: 4 pillars, 5 categories
    /// each, 63 questions total.
    pub fn standard() -> Self {
        Self {
            pillars: vec![
                PillarTaxonomy {
                    id: PillarId::Pilar1,
                    categories: vec![
                        category(
                            "Visión Digital",
                            &[
                                "vision_digital_definida",
                                "vision_digital_documentada",
                                "revision_vision_digital",
                            ],
                        ),
                        category(
                            "Alineación Estratégica",
                            &[
                                "alineacion_estrategica",
                                "evaluacion_impacto_digital",
                                "integracion_planeacion",
                            ],
                        ),
                        category(
                            "Technology Roadmap",
                            &[
                                "roadmap_tecnologico",
                                "actualizacion_roadmap",
                                "uso_taxonomia_digital",
                            ],
                        ),
                        category(
                            "Curva S",
                            &[
                                "momento_incorporacion_tecnologia",
                                "ciclo_vida_impacto_tecnologia",
                                "evaluacion_madurez_tecnologia",
                            ],
                        ),
                        category(
                            "Valor Digital (CX)",
                            &[
                                "experiencia_cliente_estrategia_digital",
                                "digitalizacion_propuesta_valor",
                                "monitoreo_valor_digital",
                            ],
                        ),
                    ],
                },
                PillarTaxonomy {
                    id: PillarId::Pilar2,
                    categories: vec![
                        category(
                            "Infraestructura Tecnológica",
                            &[
                                "estado_infraestructura",
                                "conectividad_redes",
                                "plataformas_hardware",
                            ],
                        ),
                        category(
                            "Metodologías Digitales",
                            &[
                                "presencia_metodologias_innovacion",
                                "estandarizacion_enfoque_metodologico",
                                "aplicacion_practica_metodologias",
                            ],
                        ),
                        category(
                            "Automatización de Procesos",
                            &[
                                "impacto_automatizacion",
                                "mineria_procesos",
                                "porcentaje_procesos_automatizados",
                                "herramientas_bajo_costo",
                                "robustez_herramientas",
                                "herramientas_especializadas",
                            ],
                        ),
                        category(
                            "Integración de Sistemas",
                            &[
                                "nivel_integracion_sistemas",
                                "flexibilidad_arquitectura",
                                "fluidez_datos",
                            ],
                        ),
                        category(
                            "Tecnologías Emergentes",
                            &[
                                "exploracion_tecnologias",
                                "pilotos_tecnologias",
                                "escalamiento_tecnologias",
                            ],
                        ),
                    ],
                },
                PillarTaxonomy {
                    id: PillarId::Pilar3,
                    categories: vec![
                        category(
                            "Gobierno de Datos",
                            &[
                                "politicas_gestion_datos",
                                "control_acceso_datos",
                                "calidad_datos",
                            ],
                        ),
                        category(
                            "Analítica de Negocio",
                            &[
                                "nivel_herramientas_analitica",
                                "accesibilidad_comprension_datos",
                                "estructura_proceso_insights",
                            ],
                        ),
                        category(
                            "Decisiones con Datos",
                            &[
                                "confianza_datos",
                                "estructura_proceso_decisiones",
                                "integracion_analisis_decisiones",
                            ],
                        ),
                        category(
                            "Flujo de Datos",
                            &[
                                "conectividad_sistemas",
                                "fluidez_intercambio_datos",
                                "formalidad_arquitectura_datos",
                            ],
                        ),
                        category(
                            "Transaccionalidad",
                            &[
                                "frecuencia_actualizacion_datos",
                                "accesibilidad_trazabilidad_transacciones",
                                "integracion_plataformas_transaccionales",
                            ],
                        ),
                    ],
                },
                PillarTaxonomy {
                    id: PillarId::Pilar4,
                    categories: vec![
                        category(
                            "Liderazgo Digital",
                            &[
                                "compromiso_liderazgo",
                                "visibilidad_liderazgo",
                                "claridad_roles_liderazgo",
                            ],
                        ),
                        category(
                            "Cultura Digital",
                            &[
                                "apertura_cambio",
                                "comunicacion_interna",
                                "participacion_personal",
                            ],
                        ),
                        category(
                            "Talento Digital",
                            &[
                                "capacitacion_habilidades",
                                "evaluacion_competencias",
                                "atraccion_retencion_talento",
                            ],
                        ),
                        category(
                            "Gobernanza del Cambio",
                            &[
                                "estructuras_gobernanza",
                                "participacion_interdepartamental",
                                "metricas_objetivos_cambio",
                            ],
                        ),
                        category(
                            "Gestión del Cambio",
                            &[
                                "aplicacion_metodologias",
                                "comunicacion_acompanamiento",
                                "medicion_impacto_humano",
                            ],
                        ),
                    ],
                },
            ],
        }
    }

    /// Looks up one pillar's taxonomy.
    pub fn pillar(&self, id: PillarId) -> Option<&PillarTaxonomy> {
        self.pillars.iter().find(|p| p.id == id)
    }

    /// All question ids across pillars, in taxonomy order.
    pub fn question_ids(&self) -> impl Iterator<Item = &str> {
        self.pillars
            .iter()
            .flat_map(|p| p.categories.iter())
            .flat_map(|c| c.questions.iter())
            .map(String::as_str)
    }

    /// Total number of questions.
    pub fn question_count(&self) -> usize {
        self.question_ids().count()
    }

    /// Total number of categories across all pillars.
    pub fn category_count(&self) -> usize {
        self.pillars.iter().map(|p| p.categories.len()).sum()
    }

    /// True when the id belongs to some category of some pillar.
    pub fn contains_question(&self, id: &str) -> bool {
        self.question_ids().any(|q| q == id)
    }

    /// Question ids that appear more than once. Empty for a well-formed
    /// taxonomy.
    pub fn duplicated_questions(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();

        for id in self.question_ids() {
            if !seen.insert(id) && !duplicates.contains(&id) {
                duplicates.push(id);
            }
        }

        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_shape() {
        let taxonomy = Taxonomy::standard();

        assert_eq!(taxonomy.pillars.len(), 4);
        for (pillar, expected) in taxonomy.pillars.iter().zip(PillarId::ALL) {
            assert_eq!(pillar.id, expected);
            assert_eq!(pillar.categories.len(), 5);
        }

        assert_eq!(taxonomy.category_count(), 20);
        assert_eq!(taxonomy.question_count(), 63);
    }

    #[test]
    fn test_every_question_appears_exactly_once() {
        let taxonomy = Taxonomy::standard();
        assert!(taxonomy.duplicated_questions().is_empty());
    }

    #[test]
    fn test_category_order_is_preserved() {
        let taxonomy = Taxonomy::standard();
        let pilar1 = taxonomy.pillar(PillarId::Pilar1).unwrap();

        let labels: Vec<&str> = pilar1.categories.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Visión Digital",
                "Alineación Estratégica",
                "Technology Roadmap",
                "Curva S",
                "Valor Digital (CX)",
            ]
        );
    }

    #[test]
    fn test_contains_question() {
        let taxonomy = Taxonomy::standard();
        assert!(taxonomy.contains_question("calidad_datos"));
        assert!(taxonomy.contains_question("medicion_impacto_humano"));
        assert!(!taxonomy.contains_question("Nombre"));
        assert!(!taxonomy.contains_question("no_existe"));
    }
}

//! Historia clínica: the full anamnesis form stored as free-form JSON.
//!
//! The backend persists whatever `datos` object the client sends. The form
//! works over a deep merge of the stored document onto a default structure,
//! so older documents pick up fields added later without migration.

use leptos::*;
use leptos_router::{use_params_map, A};
use serde_json::{json, Map, Value};

use crate::client::{self, HistoriaClinica};
use crate::components::common::Cargando;
use crate::utils::fechas::formatear_fecha;

pub fn estructura_default() -> Value {
    json!({
        "motivoConsulta": "",
        "antecedentesQuirurgicos": {
            "cirugiaHospitalizacion": false,
            "accidentesTrauma": false,
            "hemorragias": false,
            "transfusiones": false,
            "embarazo": false,
            "detalles": ""
        },
        "problemasMedicos": {
            "cardiovascular": { "si": false, "detalle": "" },
            "hipertension": { "si": false, "detalle": "" },
            "hipotension": { "si": false, "detalle": "" },
            "respiratorio": { "si": false, "detalle": "" },
            "digestivo": { "si": false, "detalle": "" },
            "nefrologico": { "si": false, "detalle": "" },
            "hematologico": { "si": false, "detalle": "" },
            "neurologico": { "si": false, "detalle": "" },
            "epilepsia": { "si": false, "detalle": "" },
            "osteoarticular": { "si": false, "detalle": "" },
            "ginecologico": { "si": false, "detalle": "" },
            "endocrinologico": { "si": false, "detalle": "" },
            "diabetes": { "si": false, "detalle": "" },
            "infecciones": { "si": false, "detalle": "" },
            "fiebreReumatica": { "si": false, "detalle": "" },
            "nutricionales": { "si": false, "detalle": "" },
            "protesis": { "si": false, "detalle": "" },
            "discapacidad": { "si": false, "detalle": "" },
            "hiv": { "si": false, "detalle": "" },
            "otro": { "si": false, "detalle": "" }
        },
        "antecedentesFamiliares": {
            "padreVive": true,
            "padreCausaFallecimiento": "",
            "madreVive": true,
            "madreCausaFallecimiento": "",
            "hemofilia": false,
            "diabetes": false,
            "cardiacas": false,
            "discraciaSanguinea": false,
            "tiroides": false,
            "colesterol": false,
            "cancer": false
        },
        "consentimiento": { "firmado": false, "fecha": "" },
        "examenEstomatologico": {
            "labiosSuperior": "",
            "labiosInferior": "",
            "mucosaLabialSuperior": "",
            "mucosaLabialInferior": ""
        },
        "examenCavidadBucal": {
            "mucosaYugal": "",
            "paladarDuro": "",
            "paladarBlando": "",
            "dorsoLengua": "",
            "bordesLengua": "",
            "ventralLengua": "",
            "pisoBoca": "",
            "encias": ""
        },
        "adenopatias": "",
        "derivacion": false,
        "radiografias": {
            "panoramic": false,
            "panoramicFecha": "",
            "bitewing": false,
            "bitewingFecha": "",
            "seriada": false,
            "seriadaFecha": "",
            "tomografias": false,
            "tomografiasFecha": "",
            "otros": false,
            "otrosFecha": ""
        },
        "factoresEtiologicos": {
            "temorOdontologico": false,
            "factoresEconomicos": false,
            "faltaControlPlaca": false,
            "desarmoniasOclusales": false,
            "faltaEducacionSalud": false,
            "dietaOdontopatica": false,
            "iatrogenia": false,
            "bruxismo": false,
            "empujeLingual": false,
            "otro": ""
        },
        "estadoPeriodontal": "",
        "antecedentesOdontologicos": {
            "expectativas": "",
            "ultimaConsulta": "",
            "terminoTratamiento": null,
            "porQue": "",
            "cepilladoDesayuno": "",
            "cepilladoAlmuerzo": "",
            "cepilladoMerienda": "",
            "cepilladoCena": "",
            "vecesPorDia": "",
            "momentosAzucarPorDia": "",
            "insatisfechoApariencia": false,
            "porQueApariencia": "",
            "tratamientoOrtodontico": false,
            "respiradorBucal": false,
            "bruxismo": false
        },
        "formularioPreclinico": {
            "medicoCabecera": "",
            "urgenciaParentesco": "",
            "urgenciaTelefono": "",
            "alergias": "",
            "fuma": null,
            "cigarrillosPorDia": "",
            "tiempoFumando": "",
            "alcohol": null,
            "vasosPorDia": "",
            "tratamientoMedico": false,
            "tratamientoMotivo": "",
            "medicamentos": ""
        },
        "observaciones": ""
    })
}

/// Recursive merge: objects combine key by key, anything else overwrites
/// the base value.
pub fn merge_deep(base: &Value, sobre: &Value) -> Value {
    match (base, sobre) {
        (Value::Object(b), Value::Object(s)) => {
            let mut salida: Map<String, Value> = b.clone();
            for (clave, valor) in s {
                let combinado = match b.get(clave) {
                    Some(previo) => merge_deep(previo, valor),
                    None => valor.clone(),
                };
                salida.insert(clave.clone(), combinado);
            }
            Value::Object(salida)
        }
        _ => sobre.clone(),
    }
}

/// Reads a dotted path ("antecedentesFamiliares.padreVive") out of `datos`.
pub fn valor_en<'a>(datos: &'a Value, ruta: &str) -> Option<&'a Value> {
    ruta.split('.').try_fold(datos, |actual, paso| actual.get(paso))
}

/// Writes `valor` at a dotted path, creating intermediate objects.
pub fn asignar(datos: &mut Value, ruta: &str, valor: Value) {
    let mut actual = datos;
    let pasos: Vec<&str> = ruta.split('.').collect();
    for (i, paso) in pasos.iter().enumerate() {
        if i == pasos.len() - 1 {
            if let Value::Object(mapa) = actual {
                mapa.insert((*paso).to_string(), valor);
            }
            return;
        }
        if !actual.get(*paso).map(Value::is_object).unwrap_or(false) {
            if let Value::Object(mapa) = actual {
                mapa.insert((*paso).to_string(), json!({}));
            }
        }
        actual = match actual.get_mut(*paso) {
            Some(v) => v,
            None => return,
        };
    }
}

fn texto_en(datos: &Value, ruta: &str) -> String {
    valor_en(datos, ruta)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn bool_en(datos: &Value, ruta: &str) -> bool {
    valor_en(datos, ruta).and_then(Value::as_bool).unwrap_or(false)
}

fn tri_en(datos: &Value, ruta: &str) -> Option<bool> {
    valor_en(datos, ruta).and_then(Value::as_bool)
}

const PROBLEMAS_MEDICOS: [(&str, &str); 20] = [
    ("cardiovascular", "Cardiovascular"),
    ("hipertension", "Hipertensión"),
    ("hipotension", "Hipotensión"),
    ("respiratorio", "Respiratorio"),
    ("digestivo", "Digestivo"),
    ("nefrologico", "Nefrológico"),
    ("hematologico", "Hematológico"),
    ("neurologico", "Neurológico"),
    ("epilepsia", "Epilepsia"),
    ("osteoarticular", "Osteoarticular"),
    ("ginecologico", "Ginecológico"),
    ("endocrinologico", "Endocrinológico"),
    ("diabetes", "Diabetes"),
    ("infecciones", "Infecciones"),
    ("fiebreReumatica", "Fiebre reumática"),
    ("nutricionales", "Nutricionales"),
    ("protesis", "Prótesis"),
    ("discapacidad", "Discapacidad"),
    ("hiv", "HIV"),
    ("otro", "Otro"),
];

const ANTECEDENTES_QUIRURGICOS: [(&str, &str); 5] = [
    ("cirugiaHospitalizacion", "Cirugía / hospitalización"),
    ("accidentesTrauma", "Accidentes con trauma"),
    ("hemorragias", "Hemorragias"),
    ("transfusiones", "Transfusiones / inyecciones prolongadas"),
    ("embarazo", "Embarazo"),
];

const ANTECEDENTES_FAMILIARES: [(&str, &str); 7] = [
    ("hemofilia", "Hemofilia"),
    ("diabetes", "Diabetes"),
    ("cardiacas", "Cardíacas"),
    ("discraciaSanguinea", "Discrasia sanguínea"),
    ("tiroides", "Tiroides"),
    ("colesterol", "Colesterol"),
    ("cancer", "Cáncer"),
];

const FACTORES_ETIOLOGICOS: [(&str, &str); 9] = [
    ("temorOdontologico", "Temor odontológico"),
    ("factoresEconomicos", "Factores económicos"),
    ("faltaControlPlaca", "Falta de control de placa"),
    ("desarmoniasOclusales", "Desarmonías oclusales"),
    ("faltaEducacionSalud", "Falta de educación en salud"),
    ("dietaOdontopatica", "Dieta odontopática"),
    ("iatrogenia", "Iatrogenia"),
    ("bruxismo", "Bruxismo"),
    ("empujeLingual", "Empuje lingual"),
];

const RADIOGRAFIAS: [(&str, &str); 5] = [
    ("panoramic", "Panorámica"),
    ("bitewing", "Bitewing"),
    ("seriada", "Seriada"),
    ("tomografias", "Tomografías"),
    ("otros", "Otros"),
];

/// Per-cita historia clínica form.
#[component]
pub fn HistoriaClinicaCitaPage() -> impl IntoView {
    let params = use_params_map();
    let cita_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());

    let datos = create_rw_signal(estructura_default());
    let (cargado, set_cargado) = create_signal(false);
    let (error, set_error) = create_signal(Option::<String>::None);
    let (guardando, set_guardando) = create_signal(false);
    let (aviso, set_aviso) = create_signal(Option::<String>::None);

    create_effect(move |_| {
        let id = cita_id();
        if id.is_empty() {
            return;
        }
        spawn_local(async move {
            match client::historia_por_cita(&id).await {
                Ok(r) => {
                    if let Some(historia) = r.historia_clinica {
                        datos.set(merge_deep(&estructura_default(), &historia.datos));
                    }
                    set_cargado.set(true);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    });

    let guardar = move |_| {
        let id = cita_id();
        let documento = datos.get_untracked();
        set_guardando.set(true);
        set_error.set(None);
        spawn_local(async move {
            match client::historia_upsert_por_cita(&id, &documento).await {
                Ok(_) => set_aviso.set(Some("Guardado".to_string())),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_guardando.set(false);
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between gap-3 flex-wrap">
                <div class="flex items-center gap-3">
                    <A href=move || format!("/citas/{}", cita_id()) class="text-sm text-[#5fb3b0] hover:underline">
                        "← Volver a la cita"
                    </A>
                    <h1 class="text-xl font-bold text-slate-800">"Historia clínica"</h1>
                </div>
                <div class="flex items-center gap-3">
                    {move || aviso.get().map(|a| view! {
                        <span class="text-xs text-green-600">{a}</span>
                    })}
                    <button
                        class="px-4 py-2 rounded-lg bg-[#5fb3b0] hover:bg-[#4a9a97] text-white text-sm font-medium disabled:opacity-50"
                        disabled=move || guardando.get()
                        on:click=guardar
                    >
                        {move || if guardando.get() { "Guardando..." } else { "Guardar" }}
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <div class="p-3 bg-red-50 border border-red-200 rounded-lg text-red-600 text-sm">{e}</div>
            })}

            {move || if cargado.get() {
                view! { <FormularioHistoria datos=datos /> }.into_view()
            } else {
                view! { <Cargando /> }.into_view()
            }}
        </div>
    }
}

/// Sessions list: every historia clínica saved for one patient.
#[component]
pub fn HistoriaClinicaPacientePage() -> impl IntoView {
    let params = use_params_map();
    let paciente_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());

    let (historias, set_historias) = create_signal(Vec::<HistoriaClinica>::new());
    let (cargando, set_cargando) = create_signal(true);
    let (error, set_error) = create_signal(Option::<String>::None);

    create_effect(move |_| {
        let id = paciente_id();
        if id.is_empty() {
            return;
        }
        spawn_local(async move {
            set_cargando.set(true);
            match client::historias_por_paciente(&id).await {
                Ok(lista) => set_historias.set(lista),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_cargando.set(false);
        });
    });

    view! {
        <div class="space-y-6">
            <div class="flex items-center gap-3">
                <A href=move || format!("/pacientes/{}", paciente_id()) class="text-sm text-[#5fb3b0] hover:underline">
                    "← Volver a la ficha"
                </A>
                <h1 class="text-xl font-bold text-slate-800">"Historia clínica"</h1>
            </div>

            {move || error.get().map(|e| view! {
                <div class="p-3 bg-red-50 border border-red-200 rounded-lg text-red-600 text-sm">{e}</div>
            })}

            {move || if cargando.get() {
                view! { <Cargando /> }.into_view()
            } else {
                let lista = historias.get();
                if lista.is_empty() {
                    view! {
                        <p class="text-sm text-slate-400 text-center py-8">
                            "Sin historias clínicas. Se crean desde la cita correspondiente."
                        </p>
                    }.into_view()
                } else {
                    view! {
                        <div class="bg-white rounded-xl shadow divide-y divide-slate-50">
                            {lista.into_iter().map(|h| {
                                let motivo = texto_en(&h.datos, "motivoConsulta");
                                match h.cita {
                                    Some(cita) => view! {
                                        <A
                                            href=format!("/citas/{}/historia-clinica", cita.id)
                                            class="flex items-center justify-between px-4 py-3 hover:bg-slate-50"
                                        >
                                            <div>
                                                <div class="text-sm text-slate-700">
                                                    {formatear_fecha(&cita.fecha)}
                                                    {cita.hora_inicio.clone().map(|hi| format!(" · {hi}")).unwrap_or_default()}
                                                </div>
                                                {(!motivo.is_empty()).then(|| view! {
                                                    <div class="text-xs text-slate-400 mt-0.5">{motivo.clone()}</div>
                                                })}
                                            </div>
                                            <span class="text-xs text-[#5fb3b0]">"Abrir →"</span>
                                        </A>
                                    }.into_view(),
                                    None => view! {
                                        <div class="px-4 py-3 text-sm text-slate-500">
                                            "Sesión sin cita asociada"
                                        </div>
                                    }.into_view(),
                                }
                            }).collect_view()}
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}

#[component]
fn FormularioHistoria(datos: RwSignal<Value>) -> impl IntoView {
    view! {
        <div class="space-y-6">
            <Seccion titulo="Motivo de consulta">
                <CampoArea datos=datos ruta="motivoConsulta" etiqueta="" />
            </Seccion>

            <Seccion titulo="Antecedentes quirúrgicos / internación">
                {ANTECEDENTES_QUIRURGICOS.map(|(clave, etiqueta)| view! {
                    <CampoCheck datos=datos ruta=format!("antecedentesQuirurgicos.{clave}") etiqueta=etiqueta />
                }).collect_view()}
                <CampoArea datos=datos ruta="antecedentesQuirurgicos.detalles" etiqueta="Detalles" />
            </Seccion>

            <Seccion titulo="Problemas médicos actuales o pasados">
                <div class="grid md:grid-cols-2 gap-3">
                    {PROBLEMAS_MEDICOS.map(|(clave, etiqueta)| view! {
                        <FilaSiDetalle datos=datos base=format!("problemasMedicos.{clave}") etiqueta=etiqueta />
                    }).collect_view()}
                </div>
            </Seccion>

            <Seccion titulo="Antecedentes familiares">
                <div class="grid md:grid-cols-2 gap-3">
                    <CampoSiNo datos=datos ruta="antecedentesFamiliares.padreVive" etiqueta="¿Vive su padre?" />
                    <CampoTexto datos=datos ruta="antecedentesFamiliares.padreCausaFallecimiento" etiqueta="Causa de fallecimiento (padre)" />
                    <CampoSiNo datos=datos ruta="antecedentesFamiliares.madreVive" etiqueta="¿Vive su madre?" />
                    <CampoTexto datos=datos ruta="antecedentesFamiliares.madreCausaFallecimiento" etiqueta="Causa de fallecimiento (madre)" />
                </div>
                <div class="flex items-center gap-6 flex-wrap mt-3">
                    {ANTECEDENTES_FAMILIARES.map(|(clave, etiqueta)| view! {
                        <CampoCheck datos=datos ruta=format!("antecedentesFamiliares.{clave}") etiqueta=etiqueta />
                    }).collect_view()}
                </div>
            </Seccion>

            <Seccion titulo="Consentimiento">
                <div class="flex items-center gap-6 flex-wrap">
                    <CampoCheck datos=datos ruta="consentimiento.firmado" etiqueta="Consentimiento firmado" />
                    <CampoTexto datos=datos ruta="consentimiento.fecha" etiqueta="Fecha" />
                </div>
            </Seccion>

            <Seccion titulo="Examen estomatológico">
                <div class="grid md:grid-cols-2 gap-3">
                    <CampoTexto datos=datos ruta="examenEstomatologico.labiosSuperior" etiqueta="Labios superior" />
                    <CampoTexto datos=datos ruta="examenEstomatologico.labiosInferior" etiqueta="Labios inferior" />
                    <CampoTexto datos=datos ruta="examenEstomatologico.mucosaLabialSuperior" etiqueta="Mucosa labial superior" />
                    <CampoTexto datos=datos ruta="examenEstomatologico.mucosaLabialInferior" etiqueta="Mucosa labial inferior" />
                </div>
            </Seccion>

            <Seccion titulo="Examen de la cavidad bucal">
                <div class="grid md:grid-cols-2 gap-3">
                    <CampoTexto datos=datos ruta="examenCavidadBucal.mucosaYugal" etiqueta="Mucosa yugal" />
                    <CampoTexto datos=datos ruta="examenCavidadBucal.paladarDuro" etiqueta="Paladar duro" />
                    <CampoTexto datos=datos ruta="examenCavidadBucal.paladarBlando" etiqueta="Paladar blando" />
                    <CampoTexto datos=datos ruta="examenCavidadBucal.dorsoLengua" etiqueta="Dorso de la lengua" />
                    <CampoTexto datos=datos ruta="examenCavidadBucal.bordesLengua" etiqueta="Bordes de la lengua" />
                    <CampoTexto datos=datos ruta="examenCavidadBucal.ventralLengua" etiqueta="Cara ventral de la lengua" />
                    <CampoTexto datos=datos ruta="examenCavidadBucal.pisoBoca" etiqueta="Piso de la boca" />
                    <CampoTexto datos=datos ruta="examenCavidadBucal.encias" etiqueta="Encías" />
                </div>
                <div class="grid md:grid-cols-2 gap-3 mt-3">
                    <CampoTexto datos=datos ruta="adenopatias" etiqueta="Adenopatías" />
                    <CampoSiNo datos=datos ruta="derivacion" etiqueta="¿Derivación?" />
                </div>
            </Seccion>

            <Seccion titulo="Radiografías">
                {RADIOGRAFIAS.map(|(clave, etiqueta)| view! {
                    <div class="flex items-center gap-4 flex-wrap">
                        <div class="w-44">
                            <CampoCheck datos=datos ruta=format!("radiografias.{clave}") etiqueta=etiqueta />
                        </div>
                        <CampoTexto datos=datos ruta=format!("radiografias.{clave}Fecha") etiqueta="Fecha" />
                    </div>
                }).collect_view()}
            </Seccion>

            <Seccion titulo="Factores etiológicos">
                <div class="grid md:grid-cols-2 gap-3">
                    {FACTORES_ETIOLOGICOS.map(|(clave, etiqueta)| view! {
                        <CampoCheck datos=datos ruta=format!("factoresEtiologicos.{clave}") etiqueta=etiqueta />
                    }).collect_view()}
                    <CampoTexto datos=datos ruta="factoresEtiologicos.otro" etiqueta="Otro" />
                </div>
                <div class="mt-3">
                    <CampoArea datos=datos ruta="estadoPeriodontal" etiqueta="Estado periodontal" />
                </div>
            </Seccion>

            <Seccion titulo="Antecedentes odontológicos">
                <div class="grid md:grid-cols-2 gap-3">
                    <CampoTexto datos=datos ruta="antecedentesOdontologicos.expectativas" etiqueta="Expectativas del tratamiento" />
                    <CampoTexto datos=datos ruta="antecedentesOdontologicos.ultimaConsulta" etiqueta="Última consulta" />
                    <CampoSiNo datos=datos ruta="antecedentesOdontologicos.terminoTratamiento" etiqueta="¿Terminó el tratamiento?" />
                    <CampoTexto datos=datos ruta="antecedentesOdontologicos.porQue" etiqueta="¿Por qué?" />
                </div>
                <div class="grid md:grid-cols-4 gap-3 mt-3">
                    <CampoTexto datos=datos ruta="antecedentesOdontologicos.cepilladoDesayuno" etiqueta="Cepillado desayuno" />
                    <CampoTexto datos=datos ruta="antecedentesOdontologicos.cepilladoAlmuerzo" etiqueta="Cepillado almuerzo" />
                    <CampoTexto datos=datos ruta="antecedentesOdontologicos.cepilladoMerienda" etiqueta="Cepillado merienda" />
                    <CampoTexto datos=datos ruta="antecedentesOdontologicos.cepilladoCena" etiqueta="Cepillado cena" />
                </div>
                <div class="grid md:grid-cols-2 gap-3 mt-3">
                    <CampoTexto datos=datos ruta="antecedentesOdontologicos.vecesPorDia" etiqueta="Veces por día" />
                    <CampoTexto datos=datos ruta="antecedentesOdontologicos.momentosAzucarPorDia" etiqueta="Momentos de azúcar por día" />
                    <CampoTexto datos=datos ruta="antecedentesOdontologicos.porQueApariencia" etiqueta="¿Por qué? (apariencia)" />
                </div>
                <div class="flex items-center gap-6 flex-wrap mt-3">
                    <CampoCheck datos=datos ruta="antecedentesOdontologicos.insatisfechoApariencia" etiqueta="¿Insatisfecho con apariencia de dientes?" />
                    <CampoCheck datos=datos ruta="antecedentesOdontologicos.tratamientoOrtodontico" etiqueta="¿Tratamiento ortodóntico?" />
                    <CampoCheck datos=datos ruta="antecedentesOdontologicos.respiradorBucal" etiqueta="Respirador bucal" />
                    <CampoCheck datos=datos ruta="antecedentesOdontologicos.bruxismo" etiqueta="Bruxismo" />
                </div>
            </Seccion>

            <Seccion titulo="Formulario preclínico">
                <div class="grid md:grid-cols-2 gap-3">
                    <CampoTexto datos=datos ruta="formularioPreclinico.medicoCabecera" etiqueta="Médico de cabecera" />
                    <CampoTexto datos=datos ruta="formularioPreclinico.urgenciaParentesco" etiqueta="Contacto de urgencia (parentesco)" />
                    <CampoTexto datos=datos ruta="formularioPreclinico.urgenciaTelefono" etiqueta="Contacto de urgencia (teléfono)" />
                    <CampoTexto datos=datos ruta="formularioPreclinico.alergias" etiqueta="Alergias" />
                    <CampoSiNo datos=datos ruta="formularioPreclinico.fuma" etiqueta="¿Fuma?" />
                    <CampoTexto datos=datos ruta="formularioPreclinico.cigarrillosPorDia" etiqueta="Cigarrillos por día" />
                    <CampoTexto datos=datos ruta="formularioPreclinico.tiempoFumando" etiqueta="Tiempo fumando" />
                    <CampoSiNo datos=datos ruta="formularioPreclinico.alcohol" etiqueta="¿Consume alcohol?" />
                    <CampoTexto datos=datos ruta="formularioPreclinico.vasosPorDia" etiqueta="Vasos por día" />
                    <CampoCheck datos=datos ruta="formularioPreclinico.tratamientoMedico" etiqueta="¿Tratamiento médico actual o pasado?" />
                    <CampoTexto datos=datos ruta="formularioPreclinico.tratamientoMotivo" etiqueta="Motivo del tratamiento" />
                    <CampoTexto datos=datos ruta="formularioPreclinico.medicamentos" etiqueta="Medicamentos" />
                </div>
            </Seccion>

            <Seccion titulo="Observaciones">
                <CampoArea datos=datos ruta="observaciones" etiqueta="" />
            </Seccion>
        </div>
    }
}

#[component]
fn Seccion(titulo: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl shadow p-5">
            <h2 class="text-sm font-semibold text-slate-700 mb-4">{titulo}</h2>
            <div class="space-y-2">{children()}</div>
        </div>
    }
}

#[component]
fn CampoTexto(
    datos: RwSignal<Value>,
    #[prop(into)] ruta: String,
    #[prop(into)] etiqueta: String,
) -> impl IntoView {
    let ruta_lectura = ruta.clone();
    view! {
        <label class="block">
            {(!etiqueta.is_empty()).then(|| view! {
                <span class="block text-xs text-slate-400 mb-1">{etiqueta.clone()}</span>
            })}
            <input
                class="w-full px-3 py-2 rounded-lg border border-slate-200 text-sm focus:outline-none focus:border-[#5fb3b0]"
                prop:value=move || datos.with(|d| texto_en(d, &ruta_lectura))
                on:input=move |e| {
                    let valor = event_target_value(&e);
                    datos.update(|d| asignar(d, &ruta, Value::String(valor)));
                }
            />
        </label>
    }
}

#[component]
fn CampoArea(
    datos: RwSignal<Value>,
    #[prop(into)] ruta: String,
    #[prop(into)] etiqueta: String,
) -> impl IntoView {
    let ruta_lectura = ruta.clone();
    view! {
        <label class="block">
            {(!etiqueta.is_empty()).then(|| view! {
                <span class="block text-xs text-slate-400 mb-1">{etiqueta.clone()}</span>
            })}
            <textarea
                class="w-full px-3 py-2 rounded-lg border border-slate-200 text-sm focus:outline-none focus:border-[#5fb3b0]"
                rows=3
                prop:value=move || datos.with(|d| texto_en(d, &ruta_lectura))
                on:input=move |e| {
                    let valor = event_target_value(&e);
                    datos.update(|d| asignar(d, &ruta, Value::String(valor)));
                }
            ></textarea>
        </label>
    }
}

#[component]
fn CampoCheck(
    datos: RwSignal<Value>,
    #[prop(into)] ruta: String,
    #[prop(into)] etiqueta: String,
) -> impl IntoView {
    let ruta_lectura = ruta.clone();
    view! {
        <label class="flex items-center gap-2 text-sm text-slate-600 cursor-pointer">
            <input
                type="checkbox"
                class="accent-[#5fb3b0]"
                prop:checked=move || datos.with(|d| bool_en(d, &ruta_lectura))
                on:change=move |e| {
                    let marcado = event_target_checked(&e);
                    datos.update(|d| asignar(d, &ruta, Value::Bool(marcado)));
                }
            />
            {etiqueta}
        </label>
    }
}

/// Tri-state sí/no: unanswered questions stay `null`.
#[component]
fn CampoSiNo(
    datos: RwSignal<Value>,
    #[prop(into)] ruta: String,
    #[prop(into)] etiqueta: String,
) -> impl IntoView {
    let ruta_lectura = ruta.clone();
    let ruta_si = ruta.clone();
    let ruta_no_lectura = ruta.clone();
    let ruta_no = ruta;
    view! {
        <div class="flex items-center justify-between gap-3 text-sm">
            <span class="text-slate-600">{etiqueta}</span>
            <div class="flex rounded-lg border border-slate-200 overflow-hidden shrink-0">
                <button
                    class=move || format!(
                        "px-3 py-1 text-xs {}",
                        if datos.with(|d| tri_en(d, &ruta_lectura)) == Some(true) {
                            "bg-[#5fb3b0] text-white"
                        } else {
                            "text-slate-500 hover:bg-slate-50"
                        }
                    )
                    on:click=move |_| datos.update(|d| asignar(d, &ruta_si, Value::Bool(true)))
                >
                    "Sí"
                </button>
                <button
                    class=move || format!(
                        "px-3 py-1 text-xs {}",
                        if datos.with(|d| tri_en(d, &ruta_no_lectura)) == Some(false) {
                            "bg-slate-500 text-white"
                        } else {
                            "text-slate-500 hover:bg-slate-50"
                        }
                    )
                    on:click=move |_| datos.update(|d| asignar(d, &ruta_no, Value::Bool(false)))
                >
                    "No"
                </button>
            </div>
        </div>
    }
}

/// Checkbox plus a detail field, the repeated row of the problemas grid.
#[component]
fn FilaSiDetalle(
    datos: RwSignal<Value>,
    #[prop(into)] base: String,
    #[prop(into)] etiqueta: String,
) -> impl IntoView {
    let ruta_si = format!("{base}.si");
    let ruta_detalle = format!("{base}.detalle");
    view! {
        <div class="flex items-center gap-3">
            <div class="w-44 shrink-0">
                <CampoCheck datos=datos ruta=ruta_si etiqueta=etiqueta />
            </div>
            <div class="flex-1">
                <CampoTexto datos=datos ruta=ruta_detalle etiqueta="" />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_combina_objetos_anidados() {
        let base = json!({ "a": { "x": 1, "y": 2 }, "b": "hola" });
        let sobre = json!({ "a": { "y": 9 }, "c": true });
        let salida = merge_deep(&base, &sobre);
        assert_eq!(salida["a"]["x"], 1);
        assert_eq!(salida["a"]["y"], 9);
        assert_eq!(salida["b"], "hola");
        assert_eq!(salida["c"], true);
    }

    #[test]
    fn merge_sobreescribe_no_objetos() {
        let base = json!({ "a": { "x": 1 } });
        let sobre = json!({ "a": "plano" });
        assert_eq!(merge_deep(&base, &sobre)["a"], "plano");
    }

    #[test]
    fn lectura_y_escritura_por_ruta() {
        let mut doc = estructura_default();
        assert_eq!(
            valor_en(&doc, "antecedentesFamiliares.padreVive"),
            Some(&json!(true))
        );
        asignar(&mut doc, "problemasMedicos.diabetes.si", json!(true));
        asignar(&mut doc, "problemasMedicos.diabetes.detalle", json!("tipo 2"));
        assert_eq!(valor_en(&doc, "problemasMedicos.diabetes.si"), Some(&json!(true)));
        assert_eq!(texto_en(&doc, "problemasMedicos.diabetes.detalle"), "tipo 2");
    }

    #[test]
    fn asignar_crea_intermedios() {
        let mut doc = json!({});
        asignar(&mut doc, "a.b.c", json!(5));
        assert_eq!(valor_en(&doc, "a.b.c"), Some(&json!(5)));
    }

    #[test]
    fn documento_viejo_conserva_campos_nuevos() {
        let guardado = json!({ "motivoConsulta": "dolor", "formularioPreclinico": { "fuma": true } });
        let doc = merge_deep(&estructura_default(), &guardado);
        assert_eq!(doc["motivoConsulta"], "dolor");
        assert_eq!(doc["formularioPreclinico"]["fuma"], true);
        // defaults that the stored doc never touched survive the merge
        assert_eq!(doc["formularioPreclinico"]["medicamentos"], "");
        assert_eq!(doc["antecedentesFamiliares"]["madreVive"], true);
    }

    #[test]
    fn esquema_por_defecto_usa_booleanos_planos() {
        let doc = estructura_default();
        assert_eq!(doc["antecedentesQuirurgicos"]["hemorragias"], false);
        assert_eq!(doc["antecedentesFamiliares"]["hemofilia"], false);
        assert_eq!(doc["problemasMedicos"]["diabetes"]["si"], false);
        assert_eq!(doc["formularioPreclinico"]["tratamientoMedico"], false);
        // the only tri-state defaults: unanswered stays null
        assert_eq!(
            doc["antecedentesOdontologicos"]["terminoTratamiento"],
            Value::Null
        );
        assert_eq!(doc["formularioPreclinico"]["fuma"], Value::Null);
    }

    #[test]
    fn documento_guardado_se_lee_como_respondido() {
        let guardado = json!({
            "antecedentesQuirurgicos": { "hemorragias": true },
            "antecedentesFamiliares": { "hemofilia": true, "padreVive": false },
            "problemasMedicos": { "diabetes": { "si": true, "detalle": "tipo 2" } }
        });
        let doc = merge_deep(&estructura_default(), &guardado);
        assert!(bool_en(&doc, "antecedentesQuirurgicos.hemorragias"));
        assert!(bool_en(&doc, "antecedentesFamiliares.hemofilia"));
        assert_eq!(tri_en(&doc, "antecedentesFamiliares.padreVive"), Some(false));
        assert!(bool_en(&doc, "problemasMedicos.diabetes.si"));
        // untouched siblings keep their boolean defaults
        assert_eq!(doc["antecedentesQuirurgicos"]["embarazo"], false);
        assert_eq!(doc["antecedentesFamiliares"]["cancer"], false);
    }

    #[test]
    fn tri_estado_distingue_null_de_false() {
        let doc = json!({ "a": null, "b": false });
        assert_eq!(tri_en(&doc, "a"), None);
        assert_eq!(tri_en(&doc, "b"), Some(false));
    }
}

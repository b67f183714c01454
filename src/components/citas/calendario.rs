use chrono::{Datelike, Duration, Local, Months, NaiveDate};
use leptos::*;
use leptos_router::use_navigate;

use crate::client::{self, Cita, Paciente};
use crate::components::common::{clase_estado_cita, Cargando};

const MESES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

const DIAS: [&str; 7] = ["Lun", "Mar", "Mié", "Jue", "Vie", "Sáb", "Dom"];

#[derive(Clone, Copy, PartialEq)]
enum Vista {
    Mes,
    Semana,
    Dia,
}

/// Cells for a Monday-first month grid, padded with `None` before day one.
fn celdas_del_mes(anchor: NaiveDate) -> Vec<Option<NaiveDate>> {
    let primero = anchor.with_day(1).unwrap_or(anchor);
    let relleno = primero.weekday().num_days_from_monday() as usize;
    let mut celdas: Vec<Option<NaiveDate>> = vec![None; relleno];
    let mut dia = primero;
    while dia.month() == primero.month() {
        celdas.push(Some(dia));
        dia = match dia.succ_opt() {
            Some(d) => d,
            None => break,
        };
    }
    while celdas.len() % 7 != 0 {
        celdas.push(None);
    }
    celdas
}

/// Monday of the week containing `dia`.
fn lunes_de(dia: NaiveDate) -> NaiveDate {
    dia - Duration::days(dia.weekday().num_days_from_monday() as i64)
}

fn fecha_de_cita(c: &Cita) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&c.fecha.chars().take(10).collect::<String>(), "%Y-%m-%d").ok()
}

#[component]
pub fn CalendarioPage() -> impl IntoView {
    let navigate = use_navigate();
    let hoy = Local::now().date_naive();

    let (vista, set_vista) = create_signal(Vista::Mes);
    let (ancla, set_ancla) = create_signal(hoy);
    let (citas, set_citas) = create_signal(Vec::<Cita>::new());
    let (pacientes, set_pacientes) = create_signal(Vec::<Paciente>::new());
    let (cargando, set_cargando) = create_signal(true);
    let (error, set_error) = create_signal(Option::<String>::None);
    let (refresco, set_refresco) = create_signal(0u32);
    let (dia_alta, set_dia_alta) = create_signal(Option::<NaiveDate>::None);

    create_effect(move |_| {
        let _ = refresco.get();
        let desde = (hoy - Months::new(1)).format("%Y-%m-%d").to_string();
        let hasta = (hoy + Months::new(2)).format("%Y-%m-%d").to_string();
        spawn_local(async move {
            set_cargando.set(true);
            match client::citas_list(Some(&desde), Some(&hasta), None).await {
                Ok(lista) => set_citas.set(lista),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_cargando.set(false);
        });
    });

    create_effect(move |_| {
        spawn_local(async move {
            if let Ok(lista) = client::pacientes_list(None).await {
                set_pacientes.set(lista);
            }
        });
    });

    let citas_de = move |dia: NaiveDate| {
        let mut del_dia: Vec<Cita> = citas
            .get()
            .into_iter()
            .filter(|c| fecha_de_cita(c) == Some(dia))
            .collect();
        del_dia.sort_by(|a, b| a.hora_inicio.cmp(&b.hora_inicio));
        del_dia
    };

    let avanzar = move |paso: i32| {
        set_ancla.update(|a| {
            *a = match vista.get_untracked() {
                Vista::Mes => {
                    if paso > 0 {
                        *a + Months::new(1)
                    } else {
                        *a - Months::new(1)
                    }
                }
                Vista::Semana => *a + Duration::days(7 * paso as i64),
                Vista::Dia => *a + Duration::days(paso as i64),
            };
        });
    };

    let titulo = move || {
        let a = ancla.get();
        match vista.get() {
            Vista::Mes => format!("{} {}", MESES[a.month0() as usize], a.year()),
            Vista::Semana => {
                let lunes = lunes_de(a);
                let domingo = lunes + Duration::days(6);
                format!(
                    "{}/{} al {}/{}",
                    lunes.day(),
                    lunes.month(),
                    domingo.day(),
                    domingo.month()
                )
            }
            Vista::Dia => format!("{} de {} {}", a.day(), MESES[a.month0() as usize], a.year()),
        }
    };

    let ir_a_cita = {
        let navigate = navigate.clone();
        move |id: String| navigate(&format!("/citas/{id}"), Default::default())
    };

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between flex-wrap gap-3">
                <div class="flex items-center gap-2">
                    <button
                        class="w-8 h-8 rounded-lg border border-slate-200 text-slate-500 hover:border-[#5fb3b0]"
                        on:click=move |_| avanzar(-1)
                    >
                        "‹"
                    </button>
                    <button
                        class="w-8 h-8 rounded-lg border border-slate-200 text-slate-500 hover:border-[#5fb3b0]"
                        on:click=move |_| avanzar(1)
                    >
                        "›"
                    </button>
                    <button
                        class="text-sm px-3 py-1.5 rounded-lg border border-slate-200 text-slate-500 hover:border-[#5fb3b0]"
                        on:click=move |_| set_ancla.set(hoy)
                    >
                        "Hoy"
                    </button>
                    <h1 class="text-lg font-bold text-slate-800 ml-2">{titulo}</h1>
                </div>
                <div class="flex rounded-lg border border-slate-200 overflow-hidden text-sm">
                    {[("Mes", Vista::Mes), ("Semana", Vista::Semana), ("Día", Vista::Dia)].map(|(label, v)| view! {
                        <button
                            class=move || format!(
                                "px-3 py-1.5 {}",
                                if vista.get() == v { "bg-[#5fb3b0] text-white" } else { "text-slate-500 hover:bg-slate-50" }
                            )
                            on:click=move |_| set_vista.set(v)
                        >
                            {label}
                        </button>
                    }).collect_view()}
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <div class="p-3 bg-red-50 border border-red-200 rounded-lg text-red-600 text-sm">{e}</div>
            })}

            {move || if cargando.get() {
                view! { <Cargando /> }.into_view()
            } else {
                let ir_a_cita = ir_a_cita.clone();
                match vista.get() {
                    Vista::Mes => {
                        let a = ancla.get();
                        view! {
                            <div class="bg-white rounded-xl shadow overflow-hidden">
                                <div class="grid grid-cols-7 border-b border-slate-100">
                                    {DIAS.map(|d| view! {
                                        <div class="py-2 text-center text-xs font-medium text-slate-400">{d}</div>
                                    }).collect_view()}
                                </div>
                                <div class="grid grid-cols-7">
                                    {celdas_del_mes(a).into_iter().map(|celda| {
                                        match celda {
                                            None => view! { <div class="min-h-[92px] border border-slate-50"></div> }.into_view(),
                                            Some(dia) => {
                                                let del_dia = citas_de(dia);
                                                let es_hoy = dia == hoy;
                                                let ir_a_cita = ir_a_cita.clone();
                                                view! {
                                                    <div
                                                        class="min-h-[92px] border border-slate-50 p-1.5 cursor-pointer hover:bg-slate-50"
                                                        on:click=move |_| set_dia_alta.set(Some(dia))
                                                    >
                                                        <span class=format!(
                                                            "inline-flex items-center justify-center w-6 h-6 text-xs rounded-full {}",
                                                            if es_hoy { "bg-[#5fb3b0] text-white font-bold" } else { "text-slate-500" }
                                                        )>
                                                            {dia.day()}
                                                        </span>
                                                        {del_dia.into_iter().take(3).map(|c| {
                                                            let id = c.id.clone();
                                                            let ir_a_cita = ir_a_cita.clone();
                                                            view! {
                                                                <div
                                                                    class=format!("mt-1 px-1.5 py-0.5 rounded text-[11px] truncate {}", clase_estado_cita(&c.estado))
                                                                    on:click=move |e: web_sys::MouseEvent| {
                                                                        e.stop_propagation();
                                                                        ir_a_cita(id.clone());
                                                                    }
                                                                >
                                                                    {format!("{} {}", c.hora_inicio, c.paciente.apellido)}
                                                                </div>
                                                            }
                                                        }).collect_view()}
                                                    </div>
                                                }.into_view()
                                            }
                                        }
                                    }).collect_view()}
                                </div>
                            </div>
                        }.into_view()
                    }
                    Vista::Semana => {
                        let lunes = lunes_de(ancla.get());
                        view! {
                            <div class="grid grid-cols-1 md:grid-cols-7 gap-2">
                                {(0..7).map(|i| {
                                    let dia = lunes + Duration::days(i);
                                    let del_dia = citas_de(dia);
                                    let ir_a_cita = ir_a_cita.clone();
                                    view! {
                                        <div class="bg-white rounded-xl shadow p-2">
                                            <div
                                                class="text-xs font-medium text-slate-400 text-center mb-2 cursor-pointer hover:text-[#5fb3b0]"
                                                on:click=move |_| set_dia_alta.set(Some(dia))
                                            >
                                                {format!("{} {}", DIAS[i as usize], dia.day())}
                                            </div>
                                            {del_dia.into_iter().map(|c| {
                                                let id = c.id.clone();
                                                let ir_a_cita = ir_a_cita.clone();
                                                view! {
                                                    <div
                                                        class=format!("mb-1 px-2 py-1 rounded text-xs cursor-pointer {}", clase_estado_cita(&c.estado))
                                                        on:click=move |_| ir_a_cita(id.clone())
                                                    >
                                                        <div class="font-medium">{c.hora_inicio.clone()}</div>
                                                        <div class="truncate">{c.paciente.nombre_completo()}</div>
                                                    </div>
                                                }
                                            }).collect_view()}
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        }.into_view()
                    }
                    Vista::Dia => {
                        let dia = ancla.get();
                        let del_dia = citas_de(dia);
                        let ir_a_cita = ir_a_cita.clone();
                        view! {
                            <div class="bg-white rounded-xl shadow p-4">
                                {if del_dia.is_empty() {
                                    view! { <p class="text-sm text-slate-400 text-center py-6">"Sin citas este día"</p> }.into_view()
                                } else {
                                    del_dia.into_iter().map(|c| {
                                        let id = c.id.clone();
                                        let ir_a_cita = ir_a_cita.clone();
                                        view! {
                                            <div
                                                class="flex items-center gap-3 px-3 py-2 rounded-lg hover:bg-slate-50 cursor-pointer"
                                                on:click=move |_| ir_a_cita(id.clone())
                                            >
                                                <span class="text-sm font-mono text-slate-500 w-24">
                                                    {format!("{} - {}", c.hora_inicio, c.hora_fin)}
                                                </span>
                                                <span class="text-sm text-slate-700 flex-1">{c.paciente.nombre_completo()}</span>
                                                <span class=format!("px-2 py-0.5 rounded-full text-xs {}", clase_estado_cita(&c.estado))>
                                                    {c.estado.clone()}
                                                </span>
                                            </div>
                                        }
                                    }).collect_view()
                                }}
                                <button
                                    class="mt-3 w-full py-2 rounded-lg border border-dashed border-slate-300 text-sm text-slate-500 hover:border-[#5fb3b0] hover:text-[#5fb3b0]"
                                    on:click=move |_| set_dia_alta.set(Some(dia))
                                >
                                    "+ Nueva cita"
                                </button>
                            </div>
                        }.into_view()
                    }
                }
            }}

            {move || dia_alta.get().map(|dia| view! {
                <ModalNuevaCita
                    dia=dia
                    pacientes=pacientes
                    on_cerrar=move |_| set_dia_alta.set(None)
                    on_guardado=move |_| {
                        set_dia_alta.set(None);
                        set_refresco.update(|n| *n += 1);
                    }
                />
            })}
        </div>
    }
}

#[component]
fn ModalNuevaCita(
    dia: NaiveDate,
    pacientes: ReadSignal<Vec<Paciente>>,
    #[prop(into)] on_cerrar: Callback<()>,
    #[prop(into)] on_guardado: Callback<()>,
) -> impl IntoView {
    let (paciente_id, set_paciente_id) = create_signal(String::new());
    let (hora_inicio, set_hora_inicio) = create_signal("09:00".to_string());
    let (hora_fin, set_hora_fin) = create_signal("09:30".to_string());
    let (motivo, set_motivo) = create_signal(String::new());
    let (guardando, set_guardando) = create_signal(false);
    let (error, set_error) = create_signal(Option::<String>::None);

    let guardar = move |_| {
        let pid = paciente_id.get();
        if pid.is_empty() {
            set_error.set(Some("Elegí un paciente".to_string()));
            return;
        }
        let m = motivo.get().trim().to_string();
        let motivo_valor = if m.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::Value::String(m)
        };
        let cuerpo = serde_json::json!({
            "pacienteId": pid,
            "fecha": dia.format("%Y-%m-%d").to_string(),
            "horaInicio": hora_inicio.get(),
            "horaFin": hora_fin.get(),
            "motivo": motivo_valor,
        });
        set_guardando.set(true);
        set_error.set(None);
        spawn_local(async move {
            match client::cita_create(&cuerpo).await {
                Ok(_) => on_guardado.call(()),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_guardando.set(false);
        });
    };

    let campo = "w-full px-3 py-2 rounded-lg border border-slate-200 text-sm focus:outline-none focus:border-[#5fb3b0]";

    view! {
        <div class="fixed inset-0 bg-black/40 z-40 flex items-center justify-center p-4">
            <div class="bg-white rounded-xl shadow-xl w-full max-w-md">
                <div class="px-5 py-4 border-b border-slate-100 flex items-center justify-between">
                    <h2 class="font-semibold text-slate-800">
                        {format!("Nueva cita · {}/{}/{}", dia.day(), dia.month(), dia.year())}
                    </h2>
                    <button class="text-slate-400 hover:text-slate-600" on:click=move |_| on_cerrar.call(())>
                        "✕"
                    </button>
                </div>
                <div class="p-5 space-y-3">
                    <select
                        class=campo
                        on:change=move |e| set_paciente_id.set(event_target_value(&e))
                    >
                        <option value="">"Elegir paciente..."</option>
                        {move || pacientes.get().into_iter().map(|p| {
                            let nombre = p.nombre_completo();
                            view! { <option value=p.id.clone()>{nombre}</option> }
                        }).collect_view()}
                    </select>
                    <div class="grid grid-cols-2 gap-3">
                        <input
                            type="time"
                            class=campo
                            prop:value=move || hora_inicio.get()
                            on:input=move |e| set_hora_inicio.set(event_target_value(&e))
                        />
                        <input
                            type="time"
                            class=campo
                            prop:value=move || hora_fin.get()
                            on:input=move |e| set_hora_fin.set(event_target_value(&e))
                        />
                    </div>
                    <input
                        class=campo
                        placeholder="Motivo (opcional)"
                        prop:value=move || motivo.get()
                        on:input=move |e| set_motivo.set(event_target_value(&e))
                    />
                    {move || error.get().map(|e| view! {
                        <div class="p-2 bg-red-50 border border-red-200 rounded text-red-600 text-xs">{e}</div>
                    })}
                </div>
                <div class="px-5 py-4 border-t border-slate-100 flex justify-end gap-2">
                    <button
                        class="px-4 py-2 rounded-lg border border-slate-200 text-sm text-slate-600"
                        on:click=move |_| on_cerrar.call(())
                    >
                        "Cancelar"
                    </button>
                    <button
                        class="px-4 py-2 rounded-lg bg-[#5fb3b0] hover:bg-[#4a9a97] text-white text-sm font-medium disabled:opacity-50"
                        disabled=move || guardando.get()
                        on:click=guardar
                    >
                        {move || if guardando.get() { "Guardando..." } else { "Crear cita" }}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grilla_arranca_en_lunes() {
        // 1/8/2026 is a Saturday, five empty cells before it
        let celdas = celdas_del_mes(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        assert_eq!(celdas.iter().take_while(|c| c.is_none()).count(), 5);
        assert_eq!(celdas.len() % 7, 0);
        assert_eq!(
            celdas.iter().filter(|c| c.is_some()).count(),
            31
        );
    }

    #[test]
    fn lunes_de_cualquier_dia() {
        let mie = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        assert_eq!(lunes_de(mie), NaiveDate::from_ymd_opt(2026, 8, 24).unwrap());
        let lun = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        assert_eq!(lunes_de(lun), lun);
    }
}

//! Dashboard: summary cards, charts and today's citas.

use leptos::*;
use leptos_router::A;

use crate::client::{self, Cita, CitaPorDia, CitasMes, DashboardData};
use crate::components::common::{whatsapp_link, Cargando, EstadoCitaBadge};
use crate::utils::fechas::formatear_fecha;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let (datos, set_datos) = create_signal(Option::<DashboardData>::None);
    let (error, set_error) = create_signal(Option::<String>::None);

    create_effect(move |_| {
        spawn_local(async move {
            match client::dashboard().await {
                Ok(d) => set_datos.set(Some(d)),
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    });

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold text-slate-800">"Dashboard"</h1>
            {move || error.get().map(|e| view! {
                <div class="p-3 bg-red-50 border border-red-200 rounded-lg text-red-600 text-sm">{e}</div>
            })}
            {move || match datos.get() {
                None => view! { <Cargando /> }.into_view(),
                Some(d) => view! { <DashboardContenido datos=d /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn DashboardContenido(datos: DashboardData) -> impl IntoView {
    let citas_mes = datos.citas_este_mes.clone().unwrap_or_default();
    let alertas = datos.alertas;

    view! {
        <div class="grid grid-cols-2 lg:grid-cols-4 gap-4">
            <TarjetaResumen titulo="Citas hoy" valor=datos.citas_del_dia.len().to_string() />
            <TarjetaResumen titulo="Total pacientes" valor=datos.total_pacientes.to_string() />
            <TarjetaResumen titulo="Citas este mes" valor=citas_mes.total.to_string() />
            <TarjetaResumen titulo="Alertas" valor=alertas.len().to_string() />
        </div>

        {(!alertas.is_empty()).then(|| view! {
            <div class="space-y-2">
                {alertas.into_iter().map(|a| {
                    let clase = if a.tipo == "error" {
                        "bg-red-50 border-red-200 text-red-700"
                    } else {
                        "bg-amber-50 border-amber-200 text-amber-700"
                    };
                    view! {
                        <div class=format!("p-3 border rounded-lg text-sm {clase}")>{a.mensaje}</div>
                    }
                }).collect_view()}
            </div>
        })}

        <div class="grid lg:grid-cols-2 gap-6">
            <div class="bg-white rounded-xl shadow p-4">
                <h2 class="text-sm font-medium text-slate-500 mb-4">"Citas últimos 7 días"</h2>
                <GraficoBarras datos=datos.citas_por_dia />
            </div>
            <div class="bg-white rounded-xl shadow p-4">
                <h2 class="text-sm font-medium text-slate-500 mb-4">"Citas del mes por estado"</h2>
                <GraficoDona datos=citas_mes />
            </div>
        </div>

        <div class="grid lg:grid-cols-2 gap-6">
            <div class="bg-white rounded-xl shadow p-4">
                <h2 class="text-sm font-medium text-slate-500 mb-4">"Citas de hoy"</h2>
                {if datos.citas_del_dia.is_empty() {
                    view! { <p class="text-sm text-slate-400 py-4 text-center">"Sin citas para hoy"</p> }.into_view()
                } else {
                    datos.citas_del_dia.into_iter().map(|c| view! {
                        <FilaCitaHoy cita=c />
                    }).collect_view()
                }}
            </div>
            <div class="bg-white rounded-xl shadow p-4">
                <h2 class="text-sm font-medium text-slate-500 mb-4">"Pacientes recientes"</h2>
                {if datos.pacientes_recientes.is_empty() {
                    view! { <p class="text-sm text-slate-400 py-4 text-center">"Sin pacientes"</p> }.into_view()
                } else {
                    datos.pacientes_recientes.into_iter().map(|p| {
                        let nombre = p.nombre_completo();
                        view! {
                            <A
                                href=format!("/pacientes/{}", p.id)
                                class="block px-3 py-2 rounded-lg hover:bg-slate-50 text-sm text-slate-700"
                            >
                                {nombre}
                            </A>
                        }
                    }).collect_view()
                }}
            </div>
        </div>
    }
}

#[component]
fn TarjetaResumen(titulo: &'static str, valor: String) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl shadow p-4">
            <div class="text-xs text-slate-500 uppercase tracking-wide">{titulo}</div>
            <div class="text-2xl font-bold text-slate-800 mt-1">{valor}</div>
        </div>
    }
}

/// One row of today's citas: hora, paciente, estado, reminder and WhatsApp.
#[component]
fn FilaCitaHoy(cita: Cita) -> impl IntoView {
    let (estado_envio, set_estado_envio) = create_signal(Option::<String>::None);
    let cita_id = cita.id.clone();

    let enviar = move |_| {
        let id = cita_id.clone();
        spawn_local(async move {
            let mensaje = match client::cita_enviar_recordatorio(&id).await {
                Ok(r) if r.enviado => "✓ Enviado".to_string(),
                Ok(r) => r.mensaje,
                Err(e) => e.to_string(),
            };
            set_estado_envio.set(Some(mensaje));
            gloo_timers::callback::Timeout::new(4_000, move || {
                set_estado_envio.set(None);
            })
            .forget();
        });
    };

    let telefono = cita.paciente.telefono.clone();
    let nombre = cita.paciente.nombre_completo();
    let paciente_id = cita.paciente.id.clone();

    view! {
        <div class="flex items-center justify-between px-3 py-2 rounded-lg hover:bg-slate-50">
            <div class="min-w-0">
                <div class="flex items-center gap-2 text-sm">
                    <span class="font-mono text-slate-500">
                        {format!("{} - {}", cita.hora_inicio, cita.hora_fin)}
                    </span>
                    <A href=format!("/pacientes/{paciente_id}") class="font-medium text-slate-700 hover:text-[#5fb3b0] truncate">
                        {nombre}
                    </A>
                    <EstadoCitaBadge estado=cita.estado.clone() />
                </div>
                {cita.motivo.clone().map(|m| view! {
                    <p class="text-xs text-slate-400 truncate">{m}</p>
                })}
            </div>
            <div class="flex items-center gap-2 shrink-0">
                {move || estado_envio.get().map(|m| view! {
                    <span class="text-xs text-[#5fb3b0]">{m}</span>
                })}
                <button
                    class="text-xs px-2 py-1 rounded border border-slate-200 text-slate-600 hover:border-[#5fb3b0]"
                    on:click=enviar
                >
                    "Recordatorio"
                </button>
                {telefono.map(|t| view! {
                    <a
                        href=whatsapp_link(&t)
                        target="_blank"
                        class="text-xs px-2 py-1 rounded border border-green-200 text-green-600 hover:bg-green-50"
                    >
                        "WhatsApp"
                    </a>
                })}
            </div>
        </div>
    }
}

/// Bar chart of citas per day, drawn as plain SVG.
#[component]
fn GraficoBarras(datos: Vec<CitaPorDia>) -> impl IntoView {
    if datos.is_empty() {
        return view! { <p class="text-sm text-slate-400 py-8 text-center">"Sin datos"</p> }.into_view();
    }
    let max = datos.iter().map(|d| d.total).max().unwrap_or(1).max(1) as f64;
    let ancho = 280.0;
    let alto = 120.0;
    let paso = ancho / datos.len() as f64;
    let barra_ancho = (paso * 0.6).min(28.0);

    view! {
        <svg viewBox=format!("0 0 {ancho} {}", alto + 18.0) class="w-full">
            {datos.into_iter().enumerate().map(|(i, d)| {
                let h = (d.total as f64 / max) * (alto - 8.0);
                let x = i as f64 * paso + (paso - barra_ancho) / 2.0;
                let y = alto - h;
                let etiqueta = formatear_fecha(&d.fecha)
                    .split('/')
                    .take(2)
                    .collect::<Vec<_>>()
                    .join("/");
                view! {
                    <g>
                        <rect
                            x=format!("{x:.1}")
                            y=format!("{y:.1}")
                            width=format!("{barra_ancho:.1}")
                            height=format!("{h:.1}")
                            rx="3"
                            fill="#5fb3b0"
                        />
                        <text
                            x=format!("{:.1}", x + barra_ancho / 2.0)
                            y=format!("{:.1}", alto + 12.0)
                            text-anchor="middle"
                            font-size="8"
                            fill="#94a3b8"
                        >
                            {etiqueta}
                        </text>
                        {(d.total > 0).then(|| view! {
                            <text
                                x=format!("{:.1}", x + barra_ancho / 2.0)
                                y=format!("{:.1}", y - 3.0)
                                text-anchor="middle"
                                font-size="8"
                                fill="#64748b"
                            >
                                {d.total}
                            </text>
                        })}
                    </g>
                }
            }).collect_view()}
        </svg>
    }
    .into_view()
}

/// Donut chart of the month's citas by estado, using stroke arcs.
#[component]
fn GraficoDona(datos: CitasMes) -> impl IntoView {
    let segmentos: Vec<(&str, u32, &str)> = vec![
        ("Pendientes", datos.pendientes, "#eab308"),
        ("Confirmadas", datos.confirmadas, "#5fb3b0"),
        ("Atendidas", datos.atendidas, "#22c55e"),
        ("Canceladas", datos.canceladas, "#ef4444"),
    ]
    .into_iter()
    .filter(|(_, v, _)| *v > 0)
    .collect();

    let total: u32 = segmentos.iter().map(|(_, v, _)| v).sum();
    if total == 0 {
        return view! { <p class="text-sm text-slate-400 py-8 text-center">"Sin citas este mes"</p> }.into_view();
    }

    let radio = 50.0_f64;
    let circ = 2.0 * std::f64::consts::PI * radio;
    let mut offset = 0.0_f64;
    let arcos = segmentos
        .iter()
        .map(|(_, v, color)| {
            let largo = *v as f64 / total as f64 * circ;
            let arco = view! {
                <circle
                    cx="70"
                    cy="70"
                    r=format!("{radio}")
                    fill="none"
                    stroke=*color
                    stroke-width="22"
                    stroke-dasharray=format!("{largo:.2} {circ:.2}")
                    stroke-dashoffset=format!("{:.2}", -offset)
                    transform="rotate(-90 70 70)"
                />
            };
            offset += largo;
            arco
        })
        .collect_view();

    view! {
        <div class="flex items-center gap-6">
            <svg viewBox="0 0 140 140" class="w-36 h-36 shrink-0">
                {arcos}
                <text x="70" y="74" text-anchor="middle" font-size="18" font-weight="bold" fill="#334155">
                    {total}
                </text>
            </svg>
            <div class="space-y-1 text-sm">
                {segmentos.into_iter().map(|(label, v, color)| view! {
                    <div class="flex items-center gap-2">
                        <span class="w-3 h-3 rounded-full" style=format!("background-color: {color}")></span>
                        <span class="text-slate-600">{label}</span>
                        <span class="text-slate-400">{v}</span>
                    </div>
                }).collect_view()}
            </div>
        </div>
    }
    .into_view()
}
